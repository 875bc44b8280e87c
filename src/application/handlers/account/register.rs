//! RegisterHandler - self-service sign-up.

use std::sync::Arc;

use crate::domain::access::Role;
use crate::domain::account::{validate_password, User, UserError};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{hash_password, AuthSession};

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
}

pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl RegisterHandler {
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

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<AuthSession, UserError> {
        let role = cmd.role.unwrap_or_default();
        if !role.is_self_assignable() {
            return Err(UserError::RoleNotAllowed(role));
        }

        // Validate everything before paying for the hash.
        let password_check = validate_password(&cmd.password);
        let created = User::create(
            &cmd.name,
            &cmd.email,
            String::new(),
            role,
            cmd.phone.as_deref(),
        );
        let mut user = match (password_check, created) {
            (Ok(()), Ok(user)) => user,
            (password, created) => {
                let mut errors = password.err().into_iter().collect::<Vec<_>>();
                errors.extend(created.err().unwrap_or_default());
                return Err(UserError::ValidationFailed(errors));
            }
        };

        let hash = hash_password(&self.hasher, &cmd.password).await?;
        user.set_password_hash(hash);
        self.users.save(&user).await?;

        let token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::account::test_support::{hasher, issuer};

    fn handler(store: &InMemoryStore) -> RegisterHandler {
        RegisterHandler::new(Arc::new(store.clone()), hasher(), issuer())
    }

    fn command(email: &str, role: Option<Role>) -> RegisterCommand {
        RegisterCommand {
            name: "Ada Lovelace".into(),
            email: email.into(),
            password: "engine42".into(),
            role,
            phone: None,
        }
    }

    #[tokio::test]
    async fn registers_with_hashed_password_and_token() {
        let store = InMemoryStore::new();
        let session = handler(&store)
            .handle(command("Ada@Example.com", None))
            .await
            .unwrap();

        assert_eq!(session.user.role, Role::User);
        assert_eq!(session.user.email.as_str(), "ada@example.com");
        assert!(session.user.password_hash.starts_with("pbkdf2-sha256$"));
        assert!(!session.token.token.is_empty());

        let stored = UserRepository::find_by_id(&store, &session.user.id).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn organizer_may_self_register_admin_may_not() {
        let store = InMemoryStore::new();
        let session = handler(&store)
            .handle(command("org@example.com", Some(Role::Organizer)))
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Organizer);

        let err = handler(&store)
            .handle(command("boss@example.com", Some(Role::Admin)))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::RoleNotAllowed(Role::Admin));
    }

    #[tokio::test]
    async fn duplicate_email_is_taken() {
        let store = InMemoryStore::new();
        handler(&store).handle(command("ada@example.com", None)).await.unwrap();

        let err = handler(&store)
            .handle(command("ADA@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::EmailTaken("ada@example.com".into()));
    }

    #[tokio::test]
    async fn reports_password_and_field_errors_together() {
        let store = InMemoryStore::new();
        let err = handler(&store)
            .handle(RegisterCommand {
                name: String::new(),
                email: "not-an-email".into(),
                password: "123".into(),
                role: None,
                phone: None,
            })
            .await
            .unwrap_err();

        match err {
            UserError::ValidationFailed(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
                assert!(fields.contains(&"password"));
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"email"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
