use async_trait::async_trait;

use crate::domain::account::{Email, User};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserRepository;

use super::store::State;
use super::InMemoryStore;

fn email_taken(state: &State, email: &Email, except: &UserId) -> bool {
    state
        .users
        .values()
        .any(|u| &u.email == email && &u.id != except)
}

fn taken_error(email: &Email) -> DomainError {
    DomainError::new(ErrorCode::EmailTaken, "Email already registered")
        .with_detail("email", email.as_str())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if email_taken(&state, &user.email, &user.id) {
            return Err(taken_error(&user.email));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user.id) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }
        if email_taken(&state, &user.email, &user.id) {
            return Err(taken_error(&user.email));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.users.remove(id).map(|_| ()).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        })
    }
}
