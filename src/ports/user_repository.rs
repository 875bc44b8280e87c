//! User repository port.

use async_trait::async_trait;

use crate::domain::account::{Email, User};
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another account uses the email
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user, including the password hash.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `EmailTaken` if the new email belongs to another account
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
