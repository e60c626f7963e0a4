//! Offering: an item on the salon's service menu (haircut, shave, …).

use serde::{Deserialize, Serialize};

use crate::error::{SalonBookError, ValidationError};
use crate::id::OfferingId;

/// A bookable service with its price and expected duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub id: OfferingId,
    pub name: String,
    /// Price in the smallest currency unit.
    pub price_cents: u32,
    pub duration_minutes: u32,
}

impl Offering {
    /// Create a builder for constructing an [`Offering`].
    #[must_use]
    pub fn builder() -> OfferingBuilder {
        OfferingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] when `name` is blank or
    /// `duration_minutes` is zero.
    pub fn validate(&self) -> Result<(), SalonBookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.duration_minutes == 0 {
            return Err(ValidationError::ZeroDuration.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Offering`].
#[derive(Debug, Default)]
pub struct OfferingBuilder {
    id: Option<OfferingId>,
    name: Option<String>,
    price_cents: u32,
    duration_minutes: u32,
}

impl OfferingBuilder {
    #[must_use]
    pub fn id(mut self, id: OfferingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn price_cents(mut self, price_cents: u32) -> Self {
        self.price_cents = price_cents;
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    /// Consume the builder, validate, and return an [`Offering`].
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] if invariants fail.
    pub fn build(self) -> Result<Offering, SalonBookError> {
        let offering = Offering {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price_cents: self.price_cents,
            duration_minutes: self.duration_minutes,
        };
        offering.validate()?;
        Ok(offering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_offering() {
        let offering = Offering::builder()
            .name("Skin fade")
            .price_cents(2500)
            .duration_minutes(45)
            .build()
            .unwrap();
        assert_eq!(offering.name, "Skin fade");
        assert_eq!(offering.price_cents, 2500);
        assert_eq!(offering.duration_minutes, 45);
    }

    #[test]
    fn should_reject_zero_duration() {
        let result = Offering::builder().name("Beard trim").build();
        assert!(matches!(
            result,
            Err(SalonBookError::Validation(ValidationError::ZeroDuration))
        ));
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Offering::builder().duration_minutes(30).build();
        assert!(matches!(
            result,
            Err(SalonBookError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_allow_free_offering() {
        let offering = Offering::builder()
            .name("Consultation")
            .duration_minutes(10)
            .build()
            .unwrap();
        assert_eq!(offering.price_cents, 0);
    }
}
