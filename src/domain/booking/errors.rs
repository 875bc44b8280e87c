//! Booking-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EventNotFound | 404 |
//! | Forbidden | 403 |
//! | AlreadyCancelled | 400 |
//! | InsufficientInventory | 400 |
//! | InvalidState | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, EventId, UserId, ValidationError,
};

/// Booking-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found.
    NotFound(BookingId),

    /// The event being booked does not exist.
    EventNotFound(EventId),

    /// Requester is neither the owner nor allowed to act on any booking.
    Forbidden { user_id: UserId, action: String },

    /// Booking has already been cancelled.
    AlreadyCancelled(BookingId),

    /// Fewer tickets remain than were requested.
    InsufficientInventory { requested: i32, available: i32 },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn event_not_found(id: EventId) -> Self {
        BookingError::EventNotFound(id)
    }

    pub fn forbidden(user_id: UserId, action: impl Into<String>) -> Self {
        BookingError::Forbidden {
            user_id,
            action: action.into(),
        }
    }

    pub fn already_cancelled(id: BookingId) -> Self {
        BookingError::AlreadyCancelled(id)
    }

    pub fn insufficient_inventory(requested: i32, available: i32) -> Self {
        BookingError::InsufficientInventory {
            requested,
            available,
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BookingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::EventNotFound(_) => ErrorCode::EventNotFound,
            BookingError::Forbidden { .. } => ErrorCode::Forbidden,
            BookingError::AlreadyCancelled(_) => ErrorCode::AlreadyCancelled,
            BookingError::InsufficientInventory { .. } => ErrorCode::InsufficientInventory,
            BookingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(id) => format!("Booking not found with id of {}", id),
            BookingError::EventNotFound(id) => format!("Event not found with id of {}", id),
            BookingError::Forbidden { user_id, action } => {
                format!("User {} is not authorized to {} this booking", user_id, action)
            }
            BookingError::AlreadyCancelled(_) => "Booking is already cancelled".to_string(),
            BookingError::InsufficientInventory { .. } => {
                "Not enough tickets available".to_string()
            }
            BookingError::InvalidState { current, attempted } => {
                format!("Cannot {} booking in {} state", attempted, current)
            }
            BookingError::ValidationFailed { message, .. } => message.clone(),
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Infrastructure(_))
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => BookingError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => BookingError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
