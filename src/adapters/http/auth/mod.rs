//! HTTP adapter for account endpoints.
//!
//! - `POST /auth/register`, `POST /auth/login` - Issue a bearer token
//! - `GET /auth/me` - Signed-in account
//! - `PUT /auth/updatedetails`, `PUT /auth/updatepassword`
//! - `GET /auth/logout` - Acknowledged only; tokens are stateless

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
