//! ProfileHandler - the signed-in user's own account.

use std::sync::Arc;

use crate::domain::account::{validate_password, ProfileUpdate, User, UserError};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{hash_password, verify_password, AuthSession};

#[derive(Debug, Clone)]
pub struct UpdateDetailsCommand {
    pub actor: AuthenticatedUser,
    pub update: ProfileUpdate,
}

#[derive(Debug, Clone)]
pub struct UpdatePasswordCommand {
    pub actor: AuthenticatedUser,
    pub current_password: String,
    pub new_password: String,
}

pub struct ProfileHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl ProfileHandler {
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

    pub async fn me(&self, actor: &AuthenticatedUser) -> Result<User, UserError> {
        self.users
            .find_by_id(&actor.id)
            .await?
            .ok_or(UserError::NotFound(actor.id))
    }

    pub async fn update_details(&self, cmd: UpdateDetailsCommand) -> Result<User, UserError> {
        let mut user = self.me(&cmd.actor).await?;
        user.apply_profile_update(cmd.update)?;
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Changes the password and returns a fresh token.
    pub async fn update_password(
        &self,
        cmd: UpdatePasswordCommand,
    ) -> Result<AuthSession, UserError> {
        let mut user = self.me(&cmd.actor).await?;
        if !verify_password(&self.hasher, &cmd.current_password, &user.password_hash).await? {
            return Err(UserError::IncorrectPassword);
        }
        validate_password(&cmd.new_password)?;

        let hash = hash_password(&self.hasher, &cmd.new_password).await?;
        user.set_password_hash(hash);
        self.users.update(&user).await?;

        let token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(AuthSession { user, token })
    }
}
