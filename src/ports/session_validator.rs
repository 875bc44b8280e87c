//! Session validation port for bearer tokens.
//!
//! Implementations must verify the signature, issuer and expiry, then
//! reload the account so that deleted users and role changes take effect
//! immediately rather than when the token expires.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::UserNotFound` if the account no longer exists
/// - `AuthError::ServiceUnavailable` if the account store is unreachable
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
