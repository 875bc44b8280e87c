//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - PBKDF2 password hashing, JWT issuing and validation
//! - `http` - axum REST API
//! - `memory` - in-memory repositories and inventory for tests and local runs
//! - `postgres` - sqlx repositories and the transactional ticket inventory

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
