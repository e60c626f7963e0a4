//! Booking service: use-cases for taking and managing bookings.

use salonbook_domain::booking::{Booking, BookingStatus};
use salonbook_domain::error::{NotFoundError, SalonBookError};
use salonbook_domain::id::{BarberId, BookingId, OfferingId};
use salonbook_domain::reference::BookingReference;
use salonbook_domain::time::{normalize_date, parse_time};

use crate::ports::{BookingNamespace, BookingRepository, CandidateSource};
use crate::reference_allocator::{RandomCandidates, ReferenceAllocator};

/// Customer-supplied fields for a new booking.
///
/// Date and time arrive as free-form strings and are normalized here.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub barber_id: BarberId,
    pub offering_id: OfferingId,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: String,
    pub time: Option<String>,
    pub notes: Option<String>,
}

/// Application service for bookings.
pub struct BookingService<R, C = RandomCandidates> {
    repo: R,
    allocator: ReferenceAllocator<C>,
}

impl<R: BookingRepository> BookingService<R> {
    /// Create a new service that draws references at random with the
    /// default attempt limit.
    pub fn new(repo: R) -> Self {
        Self::with_allocator(repo, ReferenceAllocator::default())
    }
}

impl<R: BookingRepository, C: CandidateSource> BookingService<R, C> {
    /// Create a new service using a specific reference allocator.
    pub fn with_allocator(repo: R, allocator: ReferenceAllocator<C>) -> Self {
        Self { repo, allocator }
    }

    /// Take a new booking.
    ///
    /// Normalizes the date and time, allocates a fresh booking reference,
    /// and persists the booking in the `pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] for malformed input,
    /// [`SalonBookError::ReferenceExhausted`] when no free reference was
    /// found, [`SalonBookError::Conflict`] if storage rejects a duplicate
    /// reference, or a storage error from the repository.
    #[tracing::instrument(skip(self, request), fields(barber_id = %request.barber_id))]
    pub async fn create_booking(&self, request: NewBooking) -> Result<Booking, SalonBookError> {
        let date = normalize_date(&request.date)?;
        let time = request.time.as_deref().map(parse_time).transpose()?;

        let reference = self
            .allocator
            .allocate(&BookingNamespace(&self.repo))
            .await?;

        let mut builder = Booking::builder()
            .reference(reference)
            .barber_id(request.barber_id)
            .offering_id(request.offering_id)
            .customer_name(request.customer_name)
            .customer_phone(request.customer_phone)
            .date(date);
        if let Some(time) = time {
            builder = builder.time(time);
        }
        if let Some(notes) = request.notes {
            builder = builder.notes(notes);
        }
        let booking = builder.build()?;

        let created = self.repo.create(booking).await?;
        tracing::info!(reference = %created.reference, "booking created");
        Ok(created)
    }

    /// Look up a booking by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] when no booking with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, SalonBookError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Booking",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a booking by the reference printed on the customer's receipt.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] when `reference` is not a
    /// well-formed reference, [`SalonBookError::NotFound`] when no booking
    /// carries it, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_reference(&self, reference: &str) -> Result<Booking, SalonBookError> {
        let parsed: BookingReference = reference.parse()?;
        self.repo.find_by_reference(parsed).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Booking",
                id: parsed.to_string(),
            }
            .into()
        })
    }

    /// List every booking.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, SalonBookError> {
        self.repo.get_all().await
    }

    /// List the bookings for one barber.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_barber(&self, barber_id: BarberId) -> Result<Vec<Booking>, SalonBookError> {
        self.repo.find_by_barber(barber_id).await
    }

    /// Move a booking to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] when the booking is missing,
    /// [`SalonBookError::Validation`] when the transition is not allowed,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, SalonBookError> {
        let mut booking = self.get_booking(id).await?;
        booking.transition_to(status)?;
        self.repo.update(booking).await
    }

    /// Delete a booking, freeing its reference.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_booking(&self, id: BookingId) -> Result<(), SalonBookError> {
        self.repo.delete(id).await
    }
}
