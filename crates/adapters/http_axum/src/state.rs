//! Shared application state for axum handlers.

use std::sync::Arc;

use salonbook_app::ports::{BarberRepository, BookingRepository, OfferingRepository};
use salonbook_app::services::barber_service::BarberService;
use salonbook_app::services::booking_service::BookingService;
use salonbook_app::services::offering_service::OfferingService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<BR, OR, KR> {
    /// Barber CRUD service.
    pub barber_service: Arc<BarberService<BR>>,
    /// Offering (service menu) CRUD service.
    pub offering_service: Arc<OfferingService<OR>>,
    /// Booking service, including reference allocation.
    pub booking_service: Arc<BookingService<KR>>,
}

impl<BR, OR, KR> Clone for AppState<BR, OR, KR> {
    fn clone(&self) -> Self {
        Self {
            barber_service: Arc::clone(&self.barber_service),
            offering_service: Arc::clone(&self.offering_service),
            booking_service: Arc::clone(&self.booking_service),
        }
    }
}

impl<BR, OR, KR> AppState<BR, OR, KR>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        barber_service: BarberService<BR>,
        offering_service: OfferingService<OR>,
        booking_service: BookingService<KR>,
    ) -> Self {
        Self {
            barber_service: Arc::new(barber_service),
            offering_service: Arc::new(offering_service),
            booking_service: Arc::new(booking_service),
        }
    }
}
