//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, error types and the authentication and
//! authorization building blocks used by every other domain module.

mod auth;
mod authorization;
mod errors;
mod ids;
mod slug;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{authorize_owner_or, AccessDecision, Authorizable, Grant, OwnedByUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, CategoryId, EventId, TagId, UserId};
pub use slug::slugify;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
