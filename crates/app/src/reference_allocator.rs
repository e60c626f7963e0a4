//! Booking reference allocator.
//!
//! Draws random six-symbol candidates and returns the first one the
//! namespace does not already contain. Checking and creating are separate
//! steps, so two concurrent allocations can still hand out the same
//! reference; only a unique index in storage closes that gap.

use rand::Rng;
use salonbook_domain::error::{ExhaustedError, SalonBookError};
use salonbook_domain::reference::{BookingReference, LENGTH, SYMBOL_COUNT};

use crate::ports::{CandidateSource, ReferenceNamespace};

/// Attempts made before giving up when no limit is configured.
///
/// With 36^6 possible references the chance of 32 consecutive collisions
/// is negligible until the namespace holds billions of bookings.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// Draw a reference with every symbol chosen independently and uniformly.
pub fn draw_reference<R: Rng + ?Sized>(rng: &mut R) -> BookingReference {
    let mut indices = [0u8; LENGTH];
    for slot in &mut indices {
        *slot = rng.random_range(0..SYMBOL_COUNT);
    }
    BookingReference::from_indices(indices)
}

/// [`CandidateSource`] backed by the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCandidates;

impl CandidateSource for RandomCandidates {
    fn next_candidate(&self) -> BookingReference {
        draw_reference(&mut rand::rng())
    }
}

/// Allocates booking references that are free at the time of the check.
#[derive(Debug, Clone)]
pub struct ReferenceAllocator<C = RandomCandidates> {
    source: C,
    max_attempts: u32,
}

impl Default for ReferenceAllocator<RandomCandidates> {
    fn default() -> Self {
        Self::new(RandomCandidates, DEFAULT_MAX_ATTEMPTS)
    }
}

impl<C: CandidateSource> ReferenceAllocator<C> {
    /// Create an allocator drawing from `source`.
    ///
    /// A `max_attempts` of zero is treated as one: the allocator always
    /// tries at least one candidate.
    pub fn new(source: C, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Upper bound on candidates drawn per allocation.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Return a reference that `namespace` does not contain.
    ///
    /// Collisions are retried with a fresh candidate; nothing is reserved.
    ///
    /// # Errors
    ///
    /// Returns the namespace's error unchanged if a check fails (it is not
    /// retried), or [`SalonBookError::ReferenceExhausted`] once
    /// `max_attempts` candidates have all collided.
    pub async fn allocate<N: ReferenceNamespace>(
        &self,
        namespace: &N,
    ) -> Result<BookingReference, SalonBookError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.source.next_candidate();
            if !namespace.contains(&candidate).await? {
                tracing::debug!(reference = %candidate, attempt, "allocated booking reference");
                return Ok(candidate);
            }
            tracing::debug!(reference = %candidate, attempt, "booking reference collision");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "no free booking reference found"
        );
        Err(ExhaustedError {
            attempts: self.max_attempts,
        }
        .into())
    }
}
