//! Barber: a member of staff customers can book with.

use serde::{Deserialize, Serialize};

use crate::error::{SalonBookError, ValidationError};
use crate::id::BarberId;

/// A barber working at the salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    pub id: BarberId,
    pub name: String,
    pub phone: Option<String>,
    /// Inactive barbers stay on record but are hidden from customers.
    pub active: bool,
}

impl Barber {
    /// Create a builder for constructing a [`Barber`].
    #[must_use]
    pub fn builder() -> BarberBuilder {
        BarberBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), SalonBookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Barber`].
#[derive(Debug, Default)]
pub struct BarberBuilder {
    id: Option<BarberId>,
    name: Option<String>,
    phone: Option<String>,
    active: Option<bool>,
}

impl BarberBuilder {
    #[must_use]
    pub fn id(mut self, id: BarberId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Consume the builder, validate, and return a [`Barber`].
    ///
    /// New barbers are active unless stated otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SalonBookError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Barber, SalonBookError> {
        let barber = Barber {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            phone: self.phone,
            active: self.active.unwrap_or(true),
        };
        barber.validate()?;
        Ok(barber)
    }
}
