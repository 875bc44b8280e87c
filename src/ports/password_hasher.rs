//! Password hashing port.

use crate::domain::foundation::DomainError;

/// Hashes and verifies account passwords.
///
/// Synchronous: hashing is CPU-bound and callers decide whether to move it
/// off the async executor.
pub trait PasswordHasher: Send + Sync {
    /// Produces a self-describing hash string (algorithm, parameters, salt).
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns true if `password` matches `encoded`. Malformed hashes verify
    /// as false.
    fn verify(&self, password: &str, encoded: &str) -> bool;
}
