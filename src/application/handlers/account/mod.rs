//! Account handlers: registration, login, self-service profile and
//! administrator user management.

mod admin;
mod login;
mod profile;
mod register;

pub use admin::{UpdateUserCommand, UserAdminHandler};
pub use login::{LoginCommand, LoginHandler};
pub use profile::{ProfileHandler, UpdateDetailsCommand, UpdatePasswordCommand};
pub use register::{RegisterCommand, RegisterHandler};

use std::sync::Arc;

use crate::domain::account::{User, UserError};
use crate::ports::{IssuedToken, PasswordHasher};

/// A signed token and the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: IssuedToken,
}

// PBKDF2 blocks for the whole key stretch, so it runs on the blocking pool.

async fn hash_password(hasher: &Arc<dyn PasswordHasher>, password: &str) -> Result<String, UserError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| UserError::infrastructure(format!("Hashing task failed: {}", e)))?
        .map_err(UserError::from)
}

async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    encoded: &str,
) -> Result<bool, UserError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let encoded = encoded.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
        .await
        .map_err(|e| UserError::infrastructure(format!("Verification task failed: {}", e)))
}
