//! Ownership and access decisions.
//!
//! Bookings belong to the user who made them and events to their organizer.
//! A role capability can stand in for ownership: admins may view and cancel
//! any booking, or update and delete any event. [`authorize_owner_or`]
//! applies both rules and returns an [`AccessDecision`] that handlers log
//! before turning a denial into their own `Forbidden` error.

use super::{AuthenticatedUser, UserId};
use crate::domain::access::Capability;

/// Aggregates with a single owning user.
pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}

/// Aggregates that appear in access logs.
pub trait Authorizable {
    /// Name used in logs, e.g. "Booking".
    const RESOURCE_TYPE: &'static str;

    fn resource_id(&self) -> String;
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Owner,
    Capability(Capability),
}

/// Outcome of an ownership check, with enough context to log it.
#[derive(Debug, Clone)]
pub struct AccessDecision {
    pub resource_type: &'static str,
    pub resource_id: String,
    pub actor: UserId,
    /// `None` means denied.
    pub grant: Option<Grant>,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        self.grant.is_some()
    }

    pub fn log(&self, action: &str) {
        match self.grant {
            Some(grant) => tracing::debug!(
                action,
                resource_type = self.resource_type,
                resource_id = %self.resource_id,
                user_id = %self.actor,
                ?grant,
                "access granted"
            ),
            None => tracing::warn!(
                action,
                resource_type = self.resource_type,
                resource_id = %self.resource_id,
                user_id = %self.actor,
                "access denied: not the owner"
            ),
        }
    }
}

/// Grants access to the owner, or to anyone whose role carries `override_with`.
/// Ownership is checked first so an admin acting on their own booking logs
/// as the owner.
pub fn authorize_owner_or<T>(
    resource: &T,
    actor: &AuthenticatedUser,
    override_with: Capability,
) -> AccessDecision
where
    T: OwnedByUser + Authorizable,
{
    let grant = if resource.is_owner(&actor.id) {
        Some(Grant::Owner)
    } else if actor.capabilities().allows(override_with) {
        Some(Grant::Capability(override_with))
    } else {
        None
    };

    AccessDecision {
        resource_type: T::RESOURCE_TYPE,
        resource_id: resource.resource_id(),
        actor: actor.id,
        grant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::Role;

    struct Ticket {
        serial: u32,
        holder: UserId,
    }

    impl OwnedByUser for Ticket {
        fn owner_id(&self) -> &UserId {
            &self.holder
        }
    }

    impl Authorizable for Ticket {
        const RESOURCE_TYPE: &'static str = "Ticket";

        fn resource_id(&self) -> String {
            self.serial.to_string()
        }
    }

    fn actor(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "a@example.com", "A", role)
    }

    fn held_by(holder: UserId) -> Ticket {
        Ticket { serial: 7, holder }
    }

    #[test]
    fn is_owner_matches_only_the_holder() {
        let holder = UserId::new();
        let ticket = held_by(holder);

        assert!(ticket.is_owner(&holder));
        assert!(!ticket.is_owner(&UserId::new()));
    }

    #[test]
    fn owner_is_granted_without_capability() {
        let user = actor(Role::User);
        let decision = authorize_owner_or(&held_by(user.id), &user, Capability::ViewAnyBooking);

        assert_eq!(decision.grant, Some(Grant::Owner));
        assert_eq!(decision.resource_type, "Ticket");
        assert_eq!(decision.resource_id, "7");
    }

    #[test]
    fn non_owner_is_denied_without_capability() {
        let user = actor(Role::User);
        let decision =
            authorize_owner_or(&held_by(UserId::new()), &user, Capability::CancelAnyBooking);

        assert!(!decision.is_granted());
        assert_eq!(decision.actor, user.id);
    }

    #[test]
    fn capability_overrides_ownership() {
        let admin = actor(Role::Admin);
        let decision =
            authorize_owner_or(&held_by(UserId::new()), &admin, Capability::CancelAnyBooking);

        assert_eq!(
            decision.grant,
            Some(Grant::Capability(Capability::CancelAnyBooking))
        );
    }

    #[test]
    fn organizer_cannot_override_booking_ownership() {
        let organizer = actor(Role::Organizer);
        let decision =
            authorize_owner_or(&held_by(UserId::new()), &organizer, Capability::ViewAnyBooking);

        assert!(!decision.is_granted());
    }
}
