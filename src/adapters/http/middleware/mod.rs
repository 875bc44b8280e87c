//! HTTP middleware.
//!
//! - `auth` - bearer-token resolution and the `RequireAuth` extractor

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthState, RequireAuth};
