//! Pure inventory arithmetic.
//!
//! Adapters apply these rules inside whatever atomic section they have (a
//! conditional UPDATE, or a write lock); nothing here touches storage.

use serde::Serialize;

use crate::domain::foundation::EventId;

/// Returned when a reservation asks for more than remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub requested: i32,
    pub available: i32,
}

/// Returns the remaining count after taking `requested` tickets.
pub fn try_reserve(available: i32, requested: i32) -> Result<i32, Shortfall> {
    if requested > available {
        return Err(Shortfall {
            requested,
            available,
        });
    }
    Ok(available - requested)
}

/// Returns the count after giving back `count` tickets, never above `capacity`.
pub fn release(available: i32, capacity: i32, count: i32) -> i32 {
    available.saturating_add(count).min(capacity)
}

/// Snapshot comparing an event's counter with its active bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAudit {
    pub event_id: EventId,
    pub capacity: i32,
    pub available_tickets: i32,
    pub booked_tickets: i64,
    pub consistent: bool,
}

impl InventoryAudit {
    pub fn new(event_id: EventId, capacity: i32, available_tickets: i32, booked_tickets: i64) -> Self {
        Self {
            event_id,
            capacity,
            available_tickets,
            booked_tickets,
            consistent: available_tickets as i64 == capacity as i64 - booked_tickets,
        }
    }
}
