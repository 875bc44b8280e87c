//! Human-readable booking references, e.g. `BK-12345678-0042`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// Builds `BK-<last 8 digits of epoch millis>-<4 random digits>`.
    pub fn generate(at: Timestamp) -> Self {
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        Self::from_parts(at.as_unix_millis(), suffix)
    }

    fn from_parts(millis: i64, suffix: u16) -> Self {
        Self(format!("BK-{:08}-{:04}", millis.rem_euclid(100_000_000), suffix))
    }

    /// Wraps a reference loaded from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
