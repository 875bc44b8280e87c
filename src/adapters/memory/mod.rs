//! In-memory adapters.
//!
//! One `InMemoryStore` implements every repository port plus
//! `TicketInventory`. All state sits behind a single `RwLock`, so inventory
//! operations check and mutate under one write guard and are linearizable
//! just like the conditional UPDATEs of the PostgreSQL adapter.
//!
//! Useful for tests and local development.

mod bookings;
mod catalog;
mod events;
mod inventory;
mod store;
mod users;

pub use store::InMemoryStore;
