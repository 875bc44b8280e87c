//! Account error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EmailTaken | 400 |
//! | RoleNotAllowed | 400 |
//! | HasDependents | 400 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | InvalidCredentials | 401 |
//! | IncorrectPassword | 401 |
//! | Infrastructure | 500 |

use crate::domain::access::Role;
use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    NotFound(UserId),

    /// Another account already uses this email.
    EmailTaken(String),

    /// Unknown email or wrong password at login. Deliberately indistinct.
    InvalidCredentials,

    /// Current password did not match on a password change.
    IncorrectPassword,

    /// Role may not be chosen at self-registration.
    RoleNotAllowed(Role),

    /// Bookings or organized events still reference the account.
    HasDependents(UserId),

    /// Caller may not manage other accounts.
    Forbidden(UserId),

    ValidationFailed(Vec<ValidationError>),
    Infrastructure(String),
}

impl UserError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::EmailTaken(_) => ErrorCode::EmailTaken,
            UserError::InvalidCredentials | UserError::IncorrectPassword => {
                ErrorCode::InvalidCredentials
            }
            UserError::RoleNotAllowed(_)
            | UserError::HasDependents(_)
            | UserError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            UserError::Forbidden(_) => ErrorCode::Forbidden,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found with id of {}", id),
            UserError::EmailTaken(_) => "Email already registered".to_string(),
            UserError::InvalidCredentials => "Invalid credentials".to_string(),
            UserError::IncorrectPassword => "Password is incorrect".to_string(),
            UserError::RoleNotAllowed(role) => {
                format!("Role '{}' cannot be chosen at registration", role)
            }
            UserError::HasDependents(_) => {
                "Cannot delete a user who has bookings or events".to_string()
            }
            UserError::Forbidden(id) => {
                format!("User {} is not authorized to access this route", id)
            }
            UserError::ValidationFailed(errors) => errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::ValidationFailed(vec![err])
    }
}

impl From<Vec<ValidationError>> for UserError {
    fn from(errors: Vec<ValidationError>) -> Self {
        UserError::ValidationFailed(errors)
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => {
                UserError::EmailTaken(err.detail("email").unwrap_or_default().to_string())
            }
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}
