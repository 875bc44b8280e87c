//! Request bodies for user management.

use serde::Deserialize;

use crate::domain::access::Role;
use crate::domain::account::UserUpdate;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            name: request.name,
            email: request.email,
            role: request.role,
            phone: request.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_is_rejected() {
        let parsed: Result<UpdateUserRequest, _> =
            serde_json::from_value(serde_json::json!({ "role": "superuser" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn converts_to_domain_update() {
        let update: UserUpdate = UpdateUserRequest {
            role: Some(Role::Admin),
            ..Default::default()
        }
        .into();
        assert_eq!(update.role, Some(Role::Admin));
        assert!(update.name.is_none());
    }
}
