//! User aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::access::Role;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

use super::Email;

pub const NAME_MAX_LEN: usize = 50;
pub const PHONE_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const DEFAULT_PROFILE_IMAGE: &str = "default-avatar.jpg";

/// Registered account.
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    pub profile_image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a user may change on their own account.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Fields an administrator may change on any account.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
}

impl User {
    /// Creates an account from already-hashed credentials.
    pub fn create(
        name: &str,
        email: &str,
        password_hash: String,
        role: Role,
        phone: Option<&str>,
    ) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let name = validate_name(name).map_err(|e| errors.push(e)).ok();
        let email = Email::parse(email).map_err(|e| errors.push(e)).ok();
        let phone = phone
            .map(validate_phone)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => {
                let now = Timestamp::now();
                Ok(Self {
                    id: UserId::new(),
                    name,
                    email,
                    password_hash,
                    role,
                    phone,
                    profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn apply_profile_update(&mut self, update: ProfileUpdate) -> Result<(), Vec<ValidationError>> {
        self.apply(UserUpdate {
            name: update.name,
            email: update.email,
            role: None,
            phone: update.phone,
        })
    }

    /// Applies an administrative update. Nothing changes if any field is invalid.
    pub fn apply(&mut self, update: UserUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let name = update
            .name
            .as_deref()
            .map(validate_name)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();
        let email = update
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();
        let phone = update
            .phone
            .as_deref()
            .map(validate_phone)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();

        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = if phone.is_empty() { None } else { Some(phone) };
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Timestamp::now();
    }
}

/// Checks a plaintext password before it is hashed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::invalid_format(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ValidationError::too_long("name", NAME_MAX_LEN));
    }
    Ok(name.to_string())
}

fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let phone = phone.trim();
    if phone.chars().count() > PHONE_MAX_LEN {
        return Err(ValidationError::too_long("phone", PHONE_MAX_LEN));
    }
    Ok(phone.to_string())
}
