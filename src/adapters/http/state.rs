//! Shared application state for every HTTP module.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::application::handlers::account::{
    LoginHandler, ProfileHandler, RegisterHandler, UserAdminHandler,
};
use crate::application::handlers::booking::{
    CancelBookingHandler, CreateBookingHandler, GetBookingHandler, ListBookingsHandler,
};
use crate::application::handlers::catalog::{CategoryHandler, TagHandler};
use crate::application::handlers::event::{
    CreateEventHandler, DeleteEventHandler, EventQueryHandler, InventoryAuditHandler,
    UpdateEventHandler,
};
use crate::ports::{
    BookingRepository, CategoryRepository, EventRepository, PasswordHasher, SessionValidator,
    TagRepository, TicketInventory, TokenIssuer, UserRepository,
};

/// Cloned into every request; holds the ports, handlers are built on demand.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub inventory: Arc<dyn TicketInventory>,
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub issuer: Arc<dyn TokenIssuer>,
    pub validator: Arc<dyn SessionValidator>,
}

impl AppState {
    /// Every repository backed by one shared in-memory store.
    pub fn in_memory(
        store: InMemoryStore,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            events: store.clone(),
            bookings: store.clone(),
            inventory: store.clone(),
            users: store.clone(),
            categories: store.clone(),
            tags: store,
            hasher,
            issuer,
            validator,
        }
    }

    // Bookings

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(self.events.clone(), self.inventory.clone())
    }

    pub fn cancel_booking_handler(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(self.bookings.clone(), self.inventory.clone())
    }

    pub fn get_booking_handler(&self) -> GetBookingHandler {
        GetBookingHandler::new(self.bookings.clone(), self.events.clone())
    }

    pub fn list_bookings_handler(&self) -> ListBookingsHandler {
        ListBookingsHandler::new(self.bookings.clone(), self.events.clone())
    }

    // Events

    pub fn event_query_handler(&self) -> EventQueryHandler {
        EventQueryHandler::new(self.events.clone())
    }

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(
            self.events.clone(),
            self.categories.clone(),
            self.tags.clone(),
        )
    }

    pub fn update_event_handler(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(
            self.events.clone(),
            self.categories.clone(),
            self.tags.clone(),
        )
    }

    pub fn delete_event_handler(&self) -> DeleteEventHandler {
        DeleteEventHandler::new(self.events.clone(), self.bookings.clone())
    }

    pub fn inventory_audit_handler(&self) -> InventoryAuditHandler {
        InventoryAuditHandler::new(self.events.clone(), self.bookings.clone())
    }

    pub fn category_handler(&self) -> CategoryHandler {
        CategoryHandler::new(self.categories.clone(), self.events.clone())
    }

    pub fn tag_handler(&self) -> TagHandler {
        TagHandler::new(self.tags.clone(), self.events.clone())
    }

    // Accounts

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.users.clone(), self.hasher.clone(), self.issuer.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.issuer.clone())
    }

    pub fn profile_handler(&self) -> ProfileHandler {
        ProfileHandler::new(self.users.clone(), self.hasher.clone(), self.issuer.clone())
    }

    pub fn user_admin_handler(&self) -> UserAdminHandler {
        UserAdminHandler::new(self.users.clone(), self.bookings.clone(), self.events.clone())
    }
}
