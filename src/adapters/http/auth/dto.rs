//! Request and response bodies for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::account::AuthSession;
use crate::domain::access::Role;
use crate::domain::account::{ProfileUpdate, User};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateDetailsRequest> for ProfileUpdate {
    fn from(request: UpdateDetailsRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: User,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token.token,
            expires_at: session.token.expires_at,
            user: session.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_optional_and_lowercase() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "organizer"
        }))
        .unwrap();
        assert_eq!(request.role, Some(Role::Organizer));

        let request: RegisterRequest =
            serde_json::from_value(serde_json::json!({ "name": "Ada" })).unwrap();
        assert_eq!(request.role, None);
        assert!(request.password.is_empty());
    }

    #[test]
    fn password_change_accepts_camel_case() {
        let request: UpdatePasswordRequest = serde_json::from_value(serde_json::json!({
            "currentPassword": "old-one",
            "newPassword": "new-one"
        }))
        .unwrap();
        assert_eq!(request.current_password, "old-one");
        assert_eq!(request.new_password, "new-one");
    }
}
