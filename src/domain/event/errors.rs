//! Event-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | CategoryNotFound | 404 |
//! | TagNotFound | 404 |
//! | Forbidden | 403 |
//! | HasBookings | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, EventId, TagId, UserId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    NotFound(EventId),
    CategoryNotFound(CategoryId),
    TagNotFound(TagId),

    /// Requester may not act on this event.
    Forbidden { user_id: UserId, action: String },

    /// Bookings still reference the event.
    HasBookings(EventId),

    /// One or more fields failed validation.
    ValidationFailed(Vec<ValidationError>),

    Infrastructure(String),
}

impl EventError {
    pub fn not_found(id: EventId) -> Self {
        EventError::NotFound(id)
    }

    pub fn forbidden(user_id: UserId, action: impl Into<String>) -> Self {
        EventError::Forbidden {
            user_id,
            action: action.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EventError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            EventError::TagNotFound(_) => ErrorCode::TagNotFound,
            EventError::Forbidden { .. } => ErrorCode::Forbidden,
            EventError::HasBookings(_) => ErrorCode::EventHasBookings,
            EventError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            EventError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EventError::NotFound(id) => format!("Event not found with id of {}", id),
            EventError::CategoryNotFound(_) => "Category not found".to_string(),
            EventError::TagNotFound(id) => format!("Tag with id {} not found", id),
            EventError::Forbidden { user_id, action } => {
                format!("User {} is not authorized to {} this event", user_id, action)
            }
            EventError::HasBookings(_) => "Cannot delete event with existing bookings".to_string(),
            EventError::ValidationFailed(errors) => errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
            EventError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EventError {}

impl From<ValidationError> for EventError {
    fn from(err: ValidationError) -> Self {
        EventError::ValidationFailed(vec![err])
    }
}

impl From<DomainError> for EventError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                EventError::ValidationFailed(vec![ValidationError::invalid_format(
                    field,
                    err.message,
                )])
            }
            _ => EventError::Infrastructure(err.to_string()),
        }
    }
}

impl From<EventError> for DomainError {
    fn from(err: EventError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
