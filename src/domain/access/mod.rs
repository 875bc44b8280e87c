//! Access control: roles and the capability flags derived from them.

mod capabilities;
mod role;

pub use capabilities::{Capabilities, Capability};
pub use role::Role;
