//! Ticket count value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Number of tickets in one booking, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct TicketCount(i32);

impl TicketCount {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(ValidationError::out_of_range(
                "ticketCount",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ));
        }
        Ok(Self(value as i32))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for TicketCount {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TicketCount> for i32 {
    fn from(count: TicketCount) -> Self {
        count.0
    }
}

impl fmt::Display for TicketCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
