//! Booking aggregate entity.
//!
//! # Invariants
//!
//! - `total_price == unit price × ticket_count` at creation
//! - a zero total is always `Free` / `Paid`
//! - status transitions follow `BookingStatus` rules; `Cancelled` is terminal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Authorizable, BookingId, EventId, OwnedByUser, StateMachine, Timestamp, UserId,
};

use super::{
    BookingError, BookingReference, BookingStatus, PaymentMethod, PaymentStatus, TicketCount,
};

/// Price and payment terms for a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuote {
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl BookingQuote {
    /// Computes the quote for `count` tickets at `unit_price`.
    ///
    /// Free bookings are settled immediately. Paid bookings start unpaid with
    /// the requested method, defaulting to onsite; `Free` is refused for them.
    pub fn compute(
        unit_price: Decimal,
        count: TicketCount,
        requested: Option<PaymentMethod>,
    ) -> Result<Self, BookingError> {
        let total_price = unit_price * Decimal::from(count.value());

        if total_price.is_zero() {
            return Ok(Self {
                total_price,
                payment_method: PaymentMethod::Free,
                payment_status: PaymentStatus::Paid,
            });
        }

        match requested.unwrap_or_default() {
            PaymentMethod::Free => Err(BookingError::validation(
                "paymentMethod",
                "Free payment method is only available for free events",
            )),
            method => Ok(Self {
                total_price,
                payment_method: method,
                payment_status: PaymentStatus::Unpaid,
            }),
        }
    }
}

/// Booking aggregate - tickets held by one user for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub event_id: EventId,

    /// User who made the booking.
    pub user_id: UserId,

    pub ticket_count: TicketCount,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub booking_reference: BookingReference,
    pub special_requests: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Creates a confirmed booking with a fresh reference.
    ///
    /// Inventory is not touched here; the caller records the booking through
    /// the inventory port so the reservation and the insert commit together.
    pub fn confirmed(
        event_id: EventId,
        user_id: UserId,
        ticket_count: TicketCount,
        quote: BookingQuote,
        special_requests: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: BookingId::new(),
            event_id,
            user_id,
            ticket_count,
            status: BookingStatus::Confirmed,
            total_price: quote.total_price,
            payment_status: quote.payment_status,
            payment_method: quote.payment_method,
            booking_reference: BookingReference::generate(now),
            special_requests: special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Draws a fresh reference after the store reported a clash.
    pub fn reissue_reference(&mut self) {
        self.booking_reference = BookingReference::generate(Timestamp::now());
    }

    /// Moves the booking to `Cancelled`.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        if self.is_cancelled() {
            return Err(BookingError::already_cancelled(self.id));
        }
        self.transition(BookingStatus::Cancelled, "cancel")
    }

    /// Moves a pending booking to `Confirmed`.
    pub fn confirm(&mut self) -> Result<(), BookingError> {
        self.transition(BookingStatus::Confirmed, "confirm")
    }

    fn transition(&mut self, target: BookingStatus, verb: &str) -> Result<(), BookingError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| BookingError::invalid_state(self.status.as_str(), verb))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for Booking {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Authorizable for Booking {
    const RESOURCE_TYPE: &'static str = "Booking";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn count(n: i64) -> TicketCount {
        TicketCount::new(n).unwrap()
    }

    fn booking_with(status: BookingStatus) -> Booking {
        let quote = BookingQuote::compute(dec("25.00"), count(2), None).unwrap();
        let mut b = Booking::confirmed(EventId::new(), UserId::new(), count(2), quote, None);
        b.status = status;
        b
    }

    #[test]
    fn reissued_reference_keeps_the_format() {
        let mut b = booking_with(BookingStatus::Confirmed);
        b.booking_reference = BookingReference::from_stored("BK-00000000-0000");
        b.reissue_reference();

        let parts: Vec<&str> = b.booking_reference.as_str().split('-').collect();
        assert_eq!(parts[0], "BK");
        assert_eq!((parts[1].len(), parts[2].len()), (8, 4));
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    // ============================================================
    // Quote Tests
    // ============================================================

    #[test]
    fn free_event_is_settled_immediately() {
        let quote = BookingQuote::compute(Decimal::ZERO, count(5), None).unwrap();
        assert_eq!(quote.total_price, Decimal::ZERO);
        assert_eq!(quote.payment_method, PaymentMethod::Free);
        assert_eq!(quote.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn free_event_ignores_requested_method() {
        let quote =
            BookingQuote::compute(Decimal::ZERO, count(1), Some(PaymentMethod::CreditCard))
                .unwrap();
        assert_eq!(quote.payment_method, PaymentMethod::Free);
    }

    #[test]
    fn paid_event_multiplies_price_and_defaults_to_onsite() {
        let quote = BookingQuote::compute(dec("19.99"), count(3), None).unwrap();
        assert_eq!(quote.total_price, dec("59.97"));
        assert_eq!(quote.payment_method, PaymentMethod::Onsite);
        assert_eq!(quote.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn paid_event_keeps_requested_method() {
        let quote =
            BookingQuote::compute(dec("10"), count(1), Some(PaymentMethod::Paypal)).unwrap();
        assert_eq!(quote.payment_method, PaymentMethod::Paypal);
    }

    #[test]
    fn paid_event_rejects_free_method() {
        let err = BookingQuote::compute(dec("10"), count(1), Some(PaymentMethod::Free)).unwrap_err();
        assert!(matches!(
            err,
            BookingError::ValidationFailed { ref field, .. } if field == "paymentMethod"
        ));
    }

    // ============================================================
    // Lifecycle Tests
    // ============================================================

    #[test]
    fn confirmed_booking_has_reference_and_trimmed_requests() {
        let quote = BookingQuote::compute(dec("5"), count(2), None).unwrap();
        let b = Booking::confirmed(
            EventId::new(),
            UserId::new(),
            count(2),
            quote,
            Some("  aisle seat  ".to_string()),
        );

        assert_eq!(b.status, BookingStatus::Confirmed);
        assert!(b.booking_reference.as_str().starts_with("BK-"));
        assert_eq!(b.special_requests.as_deref(), Some("aisle seat"));
        assert_eq!(b.total_price, dec("10"));
    }

    #[test]
    fn blank_special_requests_become_none() {
        let quote = BookingQuote::compute(Decimal::ZERO, count(1), None).unwrap();
        let b = Booking::confirmed(EventId::new(), UserId::new(), count(1), quote, Some("   ".into()));
        assert!(b.special_requests.is_none());
    }

    #[test]
    fn cancel_confirmed_booking() {
        let mut b = booking_with(BookingStatus::Confirmed);
        b.cancel().unwrap();
        assert!(b.is_cancelled());
        assert!(!b.is_active());
    }

    #[test]
    fn cancel_twice_reports_already_cancelled() {
        let mut b = booking_with(BookingStatus::Confirmed);
        b.cancel().unwrap();
        assert_eq!(b.cancel(), Err(BookingError::already_cancelled(b.id)));
    }

    #[test]
    fn pending_booking_can_be_confirmed() {
        let mut b = booking_with(BookingStatus::Pending);
        b.confirm().unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn confirmed_booking_cannot_be_confirmed_again() {
        let mut b = booking_with(BookingStatus::Confirmed);
        assert!(matches!(b.confirm(), Err(BookingError::InvalidState { .. })));
    }

    #[test]
    fn owner_is_the_booking_user() {
        let b = booking_with(BookingStatus::Confirmed);
        assert!(b.is_owner(&b.user_id));
        assert!(!b.is_owner(&UserId::new()));
    }
}
