//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the `SessionValidator` port produces after a
//! bearer token has been verified and the account reloaded. Handlers only
//! ever see this type, never the raw token claims.

use super::UserId;
use crate::domain::access::{Capabilities, Role};
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier.
    pub id: UserId,

    /// Email address on the account.
    pub email: String,

    /// Display name on the account.
    pub name: String,

    /// Role as stored on the account at validation time.
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    /// Capability set for this user's role.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.role)
    }

    /// Returns true if the user's role is one of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Not authorized to access this route")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the account no longer exists.
    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Backing store could not be reached while validating.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ada@example.com", "Ada", role)
    }

    #[test]
    fn new_populates_fields() {
        let u = user(Role::Organizer);
        assert_eq!(u.email, "ada@example.com");
        assert_eq!(u.name, "Ada");
        assert_eq!(u.role, Role::Organizer);
    }

    #[test]
    fn has_any_role_checks_membership() {
        let u = user(Role::Organizer);
        assert!(u.has_any_role(&[Role::Admin, Role::Organizer]));
        assert!(!u.has_any_role(&[Role::Admin]));
    }

    #[test]
    fn capabilities_follow_role() {
        assert!(user(Role::Admin).capabilities().manage_users);
        assert!(!user(Role::User).capabilities().create_event);
    }

    #[test]
    fn reauthentication_required_for_token_problems() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::service_unavailable("db down").requires_reauthentication());
    }
}
