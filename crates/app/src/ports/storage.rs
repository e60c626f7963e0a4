//! Storage port: repository traits for persistence.

use std::future::Future;

use salonbook_domain::barber::Barber;
use salonbook_domain::booking::Booking;
use salonbook_domain::error::SalonBookError;
use salonbook_domain::id::{BarberId, BookingId, OfferingId};
use salonbook_domain::offering::Offering;
use salonbook_domain::reference::BookingReference;

/// Repository for persisting and querying [`Barber`]s.
pub trait BarberRepository {
    /// Create a new barber in storage.
    fn create(&self, barber: Barber) -> impl Future<Output = Result<Barber, SalonBookError>> + Send;

    /// Get a barber by its unique identifier.
    fn get_by_id(
        &self,
        id: BarberId,
    ) -> impl Future<Output = Result<Option<Barber>, SalonBookError>> + Send;

    /// Get all barbers, ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Barber>, SalonBookError>> + Send;

    /// Update an existing barber.
    fn update(&self, barber: Barber) -> impl Future<Output = Result<Barber, SalonBookError>> + Send;

    /// Delete a barber by its unique identifier.
    fn delete(&self, id: BarberId) -> impl Future<Output = Result<(), SalonBookError>> + Send;
}

/// Repository for persisting and querying [`Offering`]s.
pub trait OfferingRepository {
    /// Create a new offering in storage.
    fn create(
        &self,
        offering: Offering,
    ) -> impl Future<Output = Result<Offering, SalonBookError>> + Send;

    /// Get an offering by its unique identifier.
    fn get_by_id(
        &self,
        id: OfferingId,
    ) -> impl Future<Output = Result<Option<Offering>, SalonBookError>> + Send;

    /// Get all offerings, ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Offering>, SalonBookError>> + Send;

    /// Update an existing offering.
    fn update(
        &self,
        offering: Offering,
    ) -> impl Future<Output = Result<Offering, SalonBookError>> + Send;

    /// Delete an offering by its unique identifier.
    fn delete(&self, id: OfferingId) -> impl Future<Output = Result<(), SalonBookError>> + Send;
}

/// Repository for persisting and querying [`Booking`]s.
///
/// Implementations backed by a store with a unique index on the reference
/// should reject a duplicate in [`create`](Self::create) with
/// [`SalonBookError::Conflict`].
pub trait BookingRepository {
    /// Create a new booking in storage.
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, SalonBookError>> + Send;

    /// Get a booking by its unique identifier.
    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, SalonBookError>> + Send;

    /// Get a booking by its customer-facing reference.
    fn find_by_reference(
        &self,
        reference: BookingReference,
    ) -> impl Future<Output = Result<Option<Booking>, SalonBookError>> + Send;

    /// Whether any booking currently carries `reference`.
    fn reference_exists(
        &self,
        reference: BookingReference,
    ) -> impl Future<Output = Result<bool, SalonBookError>> + Send;

    /// Get all bookings for a barber, ordered by date then time.
    fn find_by_barber(
        &self,
        barber_id: BarberId,
    ) -> impl Future<Output = Result<Vec<Booking>, SalonBookError>> + Send;

    /// Get all bookings, ordered by date then time.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Booking>, SalonBookError>> + Send;

    /// Update an existing booking.
    fn update(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, SalonBookError>> + Send;

    /// Delete a booking by its unique identifier, freeing its reference.
    fn delete(&self, id: BookingId) -> impl Future<Output = Result<(), SalonBookError>> + Send;
}
