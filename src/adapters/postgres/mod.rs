//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresEventRepository` - event listings with filtered, paginated queries
//! - `PostgresBookingRepository` - booking reads
//! - `PostgresTicketInventory` - conditional-update stock changes and the
//!   booking writes that go with them, in one transaction
//! - `PostgresUserRepository`
//! - `PostgresCategoryRepository`, `PostgresTagRepository`

mod booking_repository;
mod catalog_repository;
mod event_repository;
mod inventory;
mod user_repository;

pub use booking_repository::PostgresBookingRepository;
pub use catalog_repository::{PostgresCategoryRepository, PostgresTagRepository};
pub use event_repository::PostgresEventRepository;
pub use inventory::PostgresTicketInventory;
pub use user_repository::PostgresUserRepository;
