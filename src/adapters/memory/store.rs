use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::User;
use crate::domain::booking::Booking;
use crate::domain::catalog::{Category, Tag};
use crate::domain::event::Event;
use crate::domain::foundation::{BookingId, CategoryId, EventId, TagId, UserId};

#[derive(Debug, Default)]
pub(super) struct State {
    pub events: HashMap<EventId, Event>,
    pub bookings: HashMap<BookingId, Booking>,
    pub users: HashMap<UserId, User>,
    pub categories: HashMap<CategoryId, Category>,
    pub tags: HashMap<TagId, Tag>,
}

/// Shared in-memory store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub(super) state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = State::default();
    }

    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }
}
