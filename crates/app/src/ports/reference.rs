//! Reference allocation ports.
//!
//! The allocator needs two capabilities: a way to ask whether a candidate
//! is already taken, and a way to draw candidates. Both are injected so the
//! allocator itself holds no global state.

use std::future::Future;

use salonbook_domain::error::SalonBookError;
use salonbook_domain::reference::BookingReference;

use super::storage::BookingRepository;

/// The set of references already assigned.
pub trait ReferenceNamespace {
    /// Whether `candidate` is already in use.
    ///
    /// Must not write or reserve anything. Calling it twice against an
    /// unchanged namespace yields the same answer.
    fn contains(
        &self,
        candidate: &BookingReference,
    ) -> impl Future<Output = Result<bool, SalonBookError>> + Send;
}

/// Source of candidate references.
pub trait CandidateSource {
    /// Draw the next candidate.
    fn next_candidate(&self) -> BookingReference;
}

/// Exposes the references held by a [`BookingRepository`] as a namespace.
pub struct BookingNamespace<'a, R>(pub &'a R);

impl<R: BookingRepository> ReferenceNamespace for BookingNamespace<'_, R> {
    fn contains(
        &self,
        candidate: &BookingReference,
    ) -> impl Future<Output = Result<bool, SalonBookError>> + Send {
        self.0.reference_exists(*candidate)
    }
}
