//! Offering service: the salon's menu of services.

use salonbook_domain::error::{NotFoundError, SalonBookError};
use salonbook_domain::id::OfferingId;
use salonbook_domain::offering::Offering;

use crate::ports::OfferingRepository;

/// Partial update for a menu item. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct OfferingChanges {
    pub name: Option<String>,
    pub price_cents: Option<u32>,
    pub duration_minutes: Option<u32>,
}

/// Application service for the service menu.
pub struct OfferingService<R> {
    repo: R,
}

impl<R: OfferingRepository> OfferingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Put a new item on the menu.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] for a blank name or a zero
    /// duration, or a storage error.
    #[tracing::instrument(skip(self, offering), fields(offering_name = %offering.name))]
    pub async fn create_offering(&self, offering: Offering) -> Result<Offering, SalonBookError> {
        offering.validate()?;
        self.repo.create(offering).await
    }

    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] when no offering has `id`, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_offering(&self, id: OfferingId) -> Result<Offering, SalonBookError> {
        match self.repo.get_by_id(id).await? {
            Some(offering) => Ok(offering),
            None => Err(NotFoundError {
                entity: "Offering",
                id: id.to_string(),
            }
            .into()),
        }
    }

    /// The whole menu, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_offerings(&self) -> Result<Vec<Offering>, SalonBookError> {
        self.repo.get_all().await
    }

    /// Reprice, rename or retime a menu item.
    ///
    /// Existing bookings keep pointing at the item; they do not snapshot
    /// its price.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] for an unknown id,
    /// [`SalonBookError::Validation`] when the result would have a blank name
    /// or zero duration (nothing is written), or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_offering(
        &self,
        id: OfferingId,
        changes: OfferingChanges,
    ) -> Result<Offering, SalonBookError> {
        let current = self.get_offering(id).await?;
        let candidate = Offering {
            name: changes.name.unwrap_or(current.name),
            price_cents: changes.price_cents.unwrap_or(current.price_cents),
            duration_minutes: changes.duration_minutes.unwrap_or(current.duration_minutes),
            ..current
        };
        candidate.validate()?;
        if candidate.price_cents != current.price_cents {
            tracing::info!(
                from = current.price_cents,
                to = candidate.price_cents,
                "offering repriced"
            );
        }
        self.repo.update(candidate).await
    }

    /// Take an item off the menu.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_offering(&self, id: OfferingId) -> Result<(), SalonBookError> {
        self.repo.delete(id).await
    }
}
