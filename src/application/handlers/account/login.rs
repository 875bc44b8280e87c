//! LoginHandler - exchanges credentials for a bearer token.

use std::sync::Arc;

use crate::domain::account::{Email, UserError};
use crate::domain::foundation::ValidationError;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{verify_password, AuthSession};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthSession, UserError> {
        let mut missing = Vec::new();
        if cmd.email.trim().is_empty() {
            missing.push(ValidationError::empty_field("email"));
        }
        if cmd.password.is_empty() {
            missing.push(ValidationError::empty_field("password"));
        }
        if !missing.is_empty() {
            return Err(UserError::ValidationFailed(missing));
        }

        // A malformed address cannot belong to anyone.
        let email = Email::parse(&cmd.email).map_err(|_| UserError::InvalidCredentials)?;
        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!(email = %email, "login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&self.hasher, &cmd.password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(AuthSession { user, token })
    }
}
