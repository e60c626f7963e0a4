//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod barbers;
#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod offerings;

use axum::Router;
use axum::routing::{get, put};

use salonbook_app::ports::{BarberRepository, BookingRepository, OfferingRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<BR, OR, KR>() -> Router<AppState<BR, OR, KR>>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    Router::new()
        // Barbers
        .route(
            "/barbers",
            get(barbers::list::<BR, OR, KR>).post(barbers::create::<BR, OR, KR>),
        )
        .route(
            "/barbers/{id}",
            get(barbers::get::<BR, OR, KR>)
                .put(barbers::update::<BR, OR, KR>)
                .delete(barbers::delete::<BR, OR, KR>),
        )
        // Offerings
        .route(
            "/offerings",
            get(offerings::list::<BR, OR, KR>).post(offerings::create::<BR, OR, KR>),
        )
        .route(
            "/offerings/{id}",
            get(offerings::get::<BR, OR, KR>)
                .put(offerings::update::<BR, OR, KR>)
                .delete(offerings::delete::<BR, OR, KR>),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::list::<BR, OR, KR>).post(bookings::create::<BR, OR, KR>),
        )
        .route(
            "/bookings/by-reference/{reference}",
            get(bookings::get_by_reference::<BR, OR, KR>),
        )
        .route(
            "/bookings/{id}",
            get(bookings::get::<BR, OR, KR>).delete(bookings::delete::<BR, OR, KR>),
        )
        .route(
            "/bookings/{id}/status",
            put(bookings::update_status::<BR, OR, KR>),
        )
}
