//! Booking: a customer's appointment with a barber for one offering.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{SalonBookError, ValidationError};
use crate::id::{BarberId, BookingId, OfferingId};
use crate::reference::BookingReference;
use crate::time::{Timestamp, now};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Stable lower-case name, as stored and serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a booking in this state may move to `next`.
    ///
    /// Staying in the same state is always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A customer appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    /// Customer-facing lookup code.
    pub reference: BookingReference,
    pub barber_id: BarberId,
    pub offering_id: OfferingId,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl Booking {
    /// Create a builder for constructing a [`Booking`].
    #[must_use]
    pub fn builder() -> BookingBuilder {
        BookingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] when the customer name or
    /// phone is blank.
    pub fn validate(&self) -> Result<(), SalonBookError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerName.into());
        }
        if self.customer_phone.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerPhone.into());
        }
        Ok(())
    }

    /// Move the booking to `next`, enforcing the status lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatusTransition`] when the move
    /// is not allowed from the current status.
    pub fn transition_to(&mut self, next: BookingStatus) -> Result<(), SalonBookError> {
        if !self.status.can_transition_to(next) {
            return Err(ValidationError::InvalidStatusTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            }
            .into());
        }
        self.status = next;
        Ok(())
    }
}

/// Step-by-step builder for [`Booking`].
#[derive(Debug, Default)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    reference: Option<BookingReference>,
    barber_id: Option<BarberId>,
    offering_id: Option<OfferingId>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    status: Option<BookingStatus>,
    notes: Option<String>,
    created_at: Option<Timestamp>,
}

impl BookingBuilder {
    #[must_use]
    pub fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn reference(mut self, reference: BookingReference) -> Self {
        self.reference = Some(reference);
        self
    }

    #[must_use]
    pub fn barber_id(mut self, barber_id: BarberId) -> Self {
        self.barber_id = Some(barber_id);
        self
    }

    #[must_use]
    pub fn offering_id(mut self, offering_id: OfferingId) -> Self {
        self.offering_id = Some(offering_id);
        self
    }

    #[must_use]
    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn customer_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Booking`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the reference, barber,
    /// offering or date is not set, or another validation error when an
    /// invariant fails.
    pub fn build(self) -> Result<Booking, SalonBookError> {
        let booking = Booking {
            id: self.id.unwrap_or_default(),
            reference: self
                .reference
                .ok_or(ValidationError::MissingField("reference"))?,
            barber_id: self
                .barber_id
                .ok_or(ValidationError::MissingField("barber_id"))?,
            offering_id: self
                .offering_id
                .ok_or(ValidationError::MissingField("offering_id"))?,
            customer_name: self.customer_name.unwrap_or_default(),
            customer_phone: self.customer_phone.unwrap_or_default(),
            date: self.date.ok_or(ValidationError::MissingField("date"))?,
            time: self.time,
            status: self.status.unwrap_or_default(),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            created_at: self.created_at.unwrap_or_else(now),
        };
        booking.validate()?;
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> BookingReference {
        "K7Q2ZD".parse().unwrap()
    }

    fn builder() -> BookingBuilder {
        Booking::builder()
            .reference(reference())
            .barber_id(BarberId::new())
            .offering_id(OfferingId::new())
            .customer_name("Jo Bloggs")
            .customer_phone("07700 900123")
            .date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
    }

    #[test]
    fn should_build_pending_booking_when_valid() {
        let booking = builder().build().unwrap();
        assert_eq!(booking.reference, reference());
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.time.is_none());
    }

    #[test]
    fn should_require_reference() {
        let result = Booking::builder()
            .barber_id(BarberId::new())
            .offering_id(OfferingId::new())
            .customer_name("Jo")
            .customer_phone("1")
            .date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(SalonBookError::Validation(ValidationError::MissingField(
                "reference"
            )))
        ));
    }

    #[test]
    fn should_reject_blank_customer_name() {
        let result = builder().customer_name(" ").build();
        assert!(matches!(
            result,
            Err(SalonBookError::Validation(
                ValidationError::EmptyCustomerName
            ))
        ));
    }

    #[test]
    fn should_reject_missing_customer_phone() {
        let booking = builder().customer_phone("").build();
        assert!(matches!(
            booking,
            Err(SalonBookError::Validation(
                ValidationError::EmptyCustomerPhone
            ))
        ));
    }

    #[test]
    fn should_drop_blank_notes() {
        let booking = builder().notes("  ").build().unwrap();
        assert!(booking.notes.is_none());
    }

    #[test]
    fn should_follow_status_lifecycle() {
        let mut booking = builder().build().unwrap();
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        booking.transition_to(BookingStatus::Completed).unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn should_reject_leaving_terminal_status() {
        let mut booking = builder().status(BookingStatus::Cancelled).build().unwrap();
        let result = booking.transition_to(BookingStatus::Confirmed);
        assert!(matches!(
            result,
            Err(SalonBookError::Validation(
                ValidationError::InvalidStatusTransition {
                    from: "cancelled",
                    to: "confirmed"
                }
            ))
        ));
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }

    #[test]
    fn should_reject_completing_unconfirmed_booking() {
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn should_accept_same_status_as_noop() {
        assert!(BookingStatus::Completed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn should_parse_status_names() {
        assert_eq!(
            "confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn should_serialize_status_in_snake_case() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let booking = builder().notes("Left-handed").build().unwrap();
        let json = serde_json::to_string(&booking).unwrap();
        let parsed: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, booking);
    }
}
