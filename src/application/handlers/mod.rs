//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler holds the ports it needs as `Arc<dyn Port>` and returns the
//! error enum of its domain module.

pub mod account;
pub mod booking;
pub mod catalog;
pub mod event;
