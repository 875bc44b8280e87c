//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept apart.

pub mod handlers;

pub use handlers::account::{
    AuthSession, LoginCommand, LoginHandler, ProfileHandler, RegisterCommand, RegisterHandler,
    UpdateDetailsCommand, UpdatePasswordCommand, UpdateUserCommand, UserAdminHandler,
};
pub use handlers::booking::{
    BookingView, CancelBookingCommand, CancelBookingHandler, CreateBookingCommand,
    CreateBookingHandler, GetBookingHandler, GetBookingQuery, ListBookingsHandler,
    ListBookingsQuery,
};
pub use handlers::catalog::{
    CategoryHandler, CreateCategoryCommand, CreateTagCommand, DeleteCategoryCommand,
    DeleteTagCommand, TagHandler,
};
pub use handlers::event::{
    CreateEventCommand, CreateEventHandler, DeleteEventCommand, DeleteEventHandler,
    EventQueryHandler, InventoryAuditHandler, InventoryAuditQuery, ListEventsQuery,
    UpdateEventCommand, UpdateEventHandler,
};
