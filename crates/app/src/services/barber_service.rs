//! Barber service: staff roster management.
//!
//! Barbers are never required by the booking flow itself; deactivating one
//! only hides them from the customer-facing roster.

use salonbook_domain::barber::Barber;
use salonbook_domain::error::{NotFoundError, SalonBookError};
use salonbook_domain::id::BarberId;

use crate::ports::BarberRepository;

/// Partial update for a barber. `None` leaves the field as it is.
///
/// A blank `phone` clears the stored number.
#[derive(Debug, Clone, Default)]
pub struct BarberChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

impl BarberChanges {
    fn apply_to(self, barber: &mut Barber) {
        if let Some(name) = self.name {
            barber.name = name;
        }
        if let Some(phone) = self.phone {
            barber.phone = Some(phone).filter(|p| !p.trim().is_empty());
        }
        if let Some(active) = self.active {
            barber.active = active;
        }
    }
}

/// Application service for the barber roster.
pub struct BarberService<R> {
    repo: R,
}

impl<R: BarberRepository> BarberService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a barber to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] for a blank name, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self, barber), fields(barber_name = %barber.name))]
    pub async fn create_barber(&self, barber: Barber) -> Result<Barber, SalonBookError> {
        barber.validate()?;
        let created = self.repo.create(barber).await?;
        tracing::info!(barber_id = %created.id, "barber added");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] when no barber has `id`, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_barber(&self, id: BarberId) -> Result<Barber, SalonBookError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| missing(id))
    }

    /// The roster, optionally restricted to barbers customers can book.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_barbers(&self, only_active: bool) -> Result<Vec<Barber>, SalonBookError> {
        let barbers = self.repo.get_all().await?;
        Ok(barbers
            .into_iter()
            .filter(|barber| !only_active || barber.active)
            .collect())
    }

    /// Apply `changes` to the stored barber.
    ///
    /// Nothing is written when the result would be invalid.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::NotFound`] for an unknown id,
    /// [`SalonBookError::Validation`] when the change blanks the name, or a
    /// storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_barber(
        &self,
        id: BarberId,
        changes: BarberChanges,
    ) -> Result<Barber, SalonBookError> {
        let mut barber = self.get_barber(id).await?;
        changes.apply_to(&mut barber);
        barber.validate()?;
        let updated = self.repo.update(barber).await?;
        tracing::info!(active = updated.active, "barber updated");
        Ok(updated)
    }

    /// Remove a barber. Their past bookings are kept.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_barber(&self, id: BarberId) -> Result<(), SalonBookError> {
        self.repo.delete(id).await
    }
}

fn missing(id: BarberId) -> SalonBookError {
    NotFoundError {
        entity: "Barber",
        id: id.to_string(),
    }
    .into()
}
