//! Mock session validator for tests.
//!
//! Maps fixed bearer strings to users so HTTP tests can authenticate
//! without signing real tokens.
//!
//! ```ignore
//! let organizer = AuthenticatedUser::new(UserId::new(), "o@example.com", "Olive", Role::Organizer);
//! let validator = MockSessionValidator::new().with_user("organizer-token", organizer);
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::access::Role;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation while set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn tokens(&self) -> RwLockReadGuard<'_, HashMap<String, AuthenticatedUser>> {
        self.tokens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn tokens_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, AuthenticatedUser>> {
        self.tokens.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers a fresh user with the given role under `token`.
    pub fn with_role(self, token: impl Into<String>, role: Role) -> Self {
        let token = token.into();
        let user = AuthenticatedUser::new(
            UserId::new(),
            format!("{}@test.example.com", token),
            format!("Test {}", role),
            role,
        );
        self.with_user(token, user)
    }

    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens_mut().insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens_mut().remove(token);
    }

    /// User registered under `token`, if any.
    pub fn user_for(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens().get(token).cloned()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.user_for(token).ok_or(AuthError::InvalidToken)
    }
}
