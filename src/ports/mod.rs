//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `EventRepository`, `BookingRepository`, `UserRepository`
//! - `CategoryRepository`, `TagRepository`
//! - `TicketInventory` - the only writer of `available_tickets`
//!
//! ## Authentication
//!
//! - `SessionValidator` - bearer token to `AuthenticatedUser`
//! - `TokenIssuer` - `User` to signed bearer token
//! - `PasswordHasher`

mod booking_repository;
mod catalog_repository;
mod event_repository;
mod password_hasher;
mod session_validator;
mod ticket_inventory;
mod token_issuer;
mod user_repository;

pub use booking_repository::BookingRepository;
pub use catalog_repository::{CategoryRepository, TagRepository};
pub use event_repository::{EventFilter, EventRepository, EventSort, Page, PageRequest};
pub use password_hasher::PasswordHasher;
pub use session_validator::SessionValidator;
pub use ticket_inventory::{InventoryError, TicketInventory};
pub use token_issuer::{IssuedToken, TokenIssuer};
pub use user_repository::UserRepository;
