//! EventHub - event listings with ticketed bookings.
//!
//! Organizers publish events with a fixed ticket capacity; attendees book
//! and cancel tickets against that capacity. Every change to an event's
//! available tickets goes through the `TicketInventory` port, which checks
//! and updates stock atomically so concurrent bookings can never oversell.
//!
//! Layout follows a ports-and-adapters split:
//! - `domain` - aggregates, value objects and their rules
//! - `ports` - async traits for storage and authentication
//! - `application` - command/query handlers
//! - `adapters` - PostgreSQL, in-memory, JWT/PBKDF2 and axum implementations
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
