//! UserAdminHandler - account management for administrators.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::account::{User, UserError, UserUpdate};
use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::ports::{
    BookingRepository, EventFilter, EventRepository, EventSort, PageRequest, UserRepository,
};

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub update: UserUpdate,
}

pub struct UserAdminHandler {
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    events: Arc<dyn EventRepository>,
}

impl UserAdminHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            users,
            bookings,
            events,
        }
    }

    fn require_admin(actor: &AuthenticatedUser) -> Result<(), UserError> {
        if actor.capabilities().allows(Capability::ManageUsers) {
            Ok(())
        } else {
            tracing::warn!(user_id = %actor.id, role = %actor.role, "user management denied");
            Err(UserError::Forbidden(actor.id))
        }
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> Result<Vec<User>, UserError> {
        Self::require_admin(actor)?;
        Ok(self.users.list().await?)
    }

    pub async fn get(&self, actor: &AuthenticatedUser, id: UserId) -> Result<User, UserError> {
        Self::require_admin(actor)?;
        self.users
            .find_by_id(&id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn update(&self, cmd: UpdateUserCommand) -> Result<User, UserError> {
        let mut user = self.get(&cmd.actor, cmd.user_id).await?;
        user.apply(cmd.update)?;
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, by = %cmd.actor.id, role = %user.role, "user updated");
        Ok(user)
    }

    /// Refuses while bookings or organized events reference the account.
    pub async fn delete(&self, actor: &AuthenticatedUser, id: UserId) -> Result<(), UserError> {
        let user = self.get(actor, id).await?;

        let organized_filter = EventFilter {
            organizer_id: Some(user.id),
            ..Default::default()
        };
        let (bookings, organized) = futures::try_join!(
            self.bookings.find_by_user(&user.id),
            self.events.list(
                &organized_filter,
                EventSort::default(),
                PageRequest { page: 1, limit: 1 },
            ),
        )?;
        let has_bookings = !bookings.is_empty();
        if has_bookings || organized.total > 0 {
            return Err(UserError::HasDependents(user.id));
        }

        self.users.delete(&user.id).await?;
        tracing::info!(user_id = %user.id, by = %actor.id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::booking::test_support::{actor, seed_event};
    use crate::application::handlers::booking::{CreateBookingCommand, CreateBookingHandler};
    use crate::domain::access::Role;

    fn handler(store: &InMemoryStore) -> UserAdminHandler {
        let s = Arc::new(store.clone());
        UserAdminHandler::new(s.clone(), s.clone(), s)
    }

    async fn stored_user(store: &InMemoryStore, email: &str) -> User {
        let user = User::create("Someone", email, "h".into(), Role::User, None).unwrap();
        UserRepository::save(store, &user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn non_admin_is_forbidden_everywhere() {
        let store = InMemoryStore::new();
        let target = stored_user(&store, "t@example.com").await;
        let organizer = actor(Role::Organizer);
        let h = handler(&store);

        assert_eq!(
            h.list(&organizer).await.unwrap_err(),
            UserError::Forbidden(organizer.id)
        );
        assert!(matches!(
            h.get(&organizer, target.id).await,
            Err(UserError::Forbidden(_))
        ));
        assert!(matches!(
            h.delete(&organizer, target.id).await,
            Err(UserError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn admin_lists_and_gets() {
        let store = InMemoryStore::new();
        let a = stored_user(&store, "a@example.com").await;
        stored_user(&store, "b@example.com").await;
        let admin = actor(Role::Admin);
        let h = handler(&store);

        assert_eq!(h.list(&admin).await.unwrap().len(), 2);
        assert_eq!(h.get(&admin, a.id).await.unwrap().email, a.email);

        let missing = UserId::new();
        assert_eq!(
            h.get(&admin, missing).await.unwrap_err(),
            UserError::NotFound(missing)
        );
    }

    #[tokio::test]
    async fn admin_can_promote() {
        let store = InMemoryStore::new();
        let target = stored_user(&store, "t@example.com").await;
        let updated = handler(&store)
            .update(UpdateUserCommand {
                actor: actor(Role::Admin),
                user_id: target.id,
                update: UserUpdate {
                    role: Some(Role::Organizer),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Organizer);
    }

    #[tokio::test]
    async fn delete_removes_account_without_dependents() {
        let store = InMemoryStore::new();
        let target = stored_user(&store, "t@example.com").await;
        handler(&store).delete(&actor(Role::Admin), target.id).await.unwrap();
        assert!(UserRepository::find_by_id(&store, &target.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_refused_for_booker() {
        let store = InMemoryStore::new();
        let event = seed_event(&store, 10, 0).await;
        let target = stored_user(&store, "t@example.com").await;
        let booker = AuthenticatedUser::new(target.id, "t@example.com", "Someone", Role::User);

        CreateBookingHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
            .handle(CreateBookingCommand {
                actor: booker,
                event_id: event.id,
                ticket_count: 1,
                special_requests: None,
                payment_method: None,
            })
            .await
            .unwrap();

        let err = handler(&store)
            .delete(&actor(Role::Admin), target.id)
            .await
            .unwrap_err();
        assert_eq!(err, UserError::HasDependents(target.id));
    }

    #[tokio::test]
    async fn delete_refused_for_organizer_with_events() {
        let store = InMemoryStore::new();
        let event = seed_event(&store, 10, 0).await;
        let organizer = User {
            id: event.organizer_id,
            ..User::create("Org", "org@example.com", "h".into(), Role::Organizer, None).unwrap()
        };
        UserRepository::save(&store, &organizer).await.unwrap();

        let err = handler(&store)
            .delete(&actor(Role::Admin), organizer.id)
            .await
            .unwrap_err();
        assert_eq!(err, UserError::HasDependents(organizer.id));
    }
}
