//! Booking domain - ticket reservations against an event.
//!
//! A booking consumes inventory when it is created and gives it back when
//! it is cancelled. Cancelled bookings are kept for the audit trail and
//! never leave the `Cancelled` state.

mod aggregate;
mod errors;
mod payment;
mod reference;
mod status;
mod ticket_count;

pub use aggregate::{Booking, BookingQuote};
pub use errors::BookingError;
pub use payment::{PaymentMethod, PaymentStatus};
pub use reference::BookingReference;
pub use status::BookingStatus;
pub use ticket_count::TicketCount;
