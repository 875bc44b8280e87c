//! Event domain - listings that carry a ticket inventory.

mod aggregate;
mod errors;
mod inventory;

pub use aggregate::{Event, EventSummary, EventUpdate, NewEvent};
pub use errors::EventError;
pub use inventory::{release, try_reserve, InventoryAudit, Shortfall};
