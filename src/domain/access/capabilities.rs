//! Role capability flags.
//!
//! The mapping from role to capabilities is a pure function; there is no
//! permission table to load or mutate at runtime.

use serde::Serialize;

use super::Role;

/// A single permission that a role may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageUsers,
    CreateEvent,
    UpdateOwnEvent,
    UpdateAnyEvent,
    DeleteOwnEvent,
    DeleteAnyEvent,
    CreateBooking,
    ViewAnyBooking,
    CancelAnyBooking,
    ManageCategories,
    ManageTags,
    AuditInventory,
}

/// Fixed set of capability flags for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub manage_users: bool,
    pub create_event: bool,
    pub update_own_event: bool,
    pub update_any_event: bool,
    pub delete_own_event: bool,
    pub delete_any_event: bool,
    pub create_booking: bool,
    pub view_any_booking: bool,
    pub cancel_any_booking: bool,
    pub manage_categories: bool,
    pub manage_tags: bool,
    pub audit_inventory: bool,
}

impl Capabilities {
    const NONE: Capabilities = Capabilities {
        manage_users: false,
        create_event: false,
        update_own_event: false,
        update_any_event: false,
        delete_own_event: false,
        delete_any_event: false,
        create_booking: false,
        view_any_booking: false,
        cancel_any_booking: false,
        manage_categories: false,
        manage_tags: false,
        audit_inventory: false,
    };

    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Capabilities {
                manage_users: true,
                create_event: true,
                update_own_event: true,
                update_any_event: true,
                delete_own_event: true,
                delete_any_event: true,
                create_booking: true,
                view_any_booking: true,
                cancel_any_booking: true,
                manage_categories: true,
                manage_tags: true,
                audit_inventory: true,
            },
            Role::Organizer => Capabilities {
                create_event: true,
                update_own_event: true,
                delete_own_event: true,
                create_booking: true,
                audit_inventory: true,
                ..Self::NONE
            },
            Role::User => Capabilities {
                create_booking: true,
                ..Self::NONE
            },
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => self.manage_users,
            Capability::CreateEvent => self.create_event,
            Capability::UpdateOwnEvent => self.update_own_event,
            Capability::UpdateAnyEvent => self.update_any_event,
            Capability::DeleteOwnEvent => self.delete_own_event,
            Capability::DeleteAnyEvent => self.delete_any_event,
            Capability::CreateBooking => self.create_booking,
            Capability::ViewAnyBooking => self.view_any_booking,
            Capability::CancelAnyBooking => self.cancel_any_booking,
            Capability::ManageCategories => self.manage_categories,
            Capability::ManageTags => self.manage_tags,
            Capability::AuditInventory => self.audit_inventory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Capability; 12] = [
        Capability::ManageUsers,
        Capability::CreateEvent,
        Capability::UpdateOwnEvent,
        Capability::UpdateAnyEvent,
        Capability::DeleteOwnEvent,
        Capability::DeleteAnyEvent,
        Capability::CreateBooking,
        Capability::ViewAnyBooking,
        Capability::CancelAnyBooking,
        Capability::ManageCategories,
        Capability::ManageTags,
        Capability::AuditInventory,
    ];

    #[test]
    fn admin_has_every_capability() {
        let caps = Capabilities::for_role(Role::Admin);
        assert!(ALL.iter().all(|c| caps.allows(*c)));
    }

    #[test]
    fn organizer_capabilities_match_table() {
        let caps = Capabilities::for_role(Role::Organizer);
        let granted: Vec<_> = ALL.iter().copied().filter(|c| caps.allows(*c)).collect();
        assert_eq!(
            granted,
            vec![
                Capability::CreateEvent,
                Capability::UpdateOwnEvent,
                Capability::DeleteOwnEvent,
                Capability::CreateBooking,
                Capability::AuditInventory,
            ]
        );
    }

    #[test]
    fn user_can_only_book() {
        let caps = Capabilities::for_role(Role::User);
        let granted: Vec<_> = ALL.iter().copied().filter(|c| caps.allows(*c)).collect();
        assert_eq!(granted, vec![Capability::CreateBooking]);
    }

    #[test]
    fn for_role_is_usable_in_const_context() {
        const USER: Capabilities = Capabilities::for_role(Role::User);
        assert!(USER.create_booking);
        assert!(!USER.manage_tags);
    }
}
