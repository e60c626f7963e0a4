//! JSON REST handlers for bookings.
//!
//! `POST /api/bookings` is the customer-facing entry point: it allocates the
//! booking reference that ends up on the receipt.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use salonbook_app::ports::{BarberRepository, BookingRepository, OfferingRepository};
use salonbook_app::services::booking_service::NewBooking;
use salonbook_domain::booking::{Booking, BookingStatus};
use salonbook_domain::id::{BarberId, BookingId, OfferingId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for taking a booking.
///
/// `date` accepts the loose formats understood by
/// [`normalize_date`](salonbook_domain::time::normalize_date).
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub barber_id: String,
    pub offering_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: String,
    pub time: Option<String>,
    pub notes: Option<String>,
}

/// Request body for changing a booking's status.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// Query string for the list endpoint.
#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub barber_id: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Booking>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Booking>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Booking>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_booking_id(id: &str) -> Result<BookingId, ApiError> {
    BookingId::from_str(id).map_err(|_| ApiError::invalid_id(id))
}

/// `GET /api/bookings[?barber_id=…]`
pub async fn list<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let bookings = match query.barber_id {
        Some(raw) => {
            let barber_id = BarberId::from_str(&raw).map_err(|_| ApiError::invalid_id(&raw))?;
            state.booking_service.list_for_barber(barber_id).await?
        }
        None => state.booking_service.list_bookings().await?,
    };
    Ok(ListResponse::Ok(Json(bookings)))
}

/// `GET /api/bookings/:id`
pub async fn get<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let booking_id = parse_booking_id(&id)?;
    let booking = state.booking_service.get_booking(booking_id).await?;
    Ok(GetResponse::Ok(Json(booking)))
}

/// `GET /api/bookings/by-reference/:reference`
pub async fn get_by_reference<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(reference): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let booking = state.booking_service.find_by_reference(&reference).await?;
    Ok(GetResponse::Ok(Json(booking)))
}

/// `POST /api/bookings`
pub async fn create<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let barber_id =
        BarberId::from_str(&req.barber_id).map_err(|_| ApiError::invalid_id(&req.barber_id))?;
    let offering_id = OfferingId::from_str(&req.offering_id)
        .map_err(|_| ApiError::invalid_id(&req.offering_id))?;

    let created = state
        .booking_service
        .create_booking(NewBooking {
            barber_id,
            offering_id,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            date: req.date,
            time: req.time,
            notes: req.notes,
        })
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/bookings/:id/status`
pub async fn update_status<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let booking_id = parse_booking_id(&id)?;
    let updated = state
        .booking_service
        .update_status(booking_id, req.status)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/bookings/:id`
pub async fn delete<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let booking_id = parse_booking_id(&id)?;
    state.booking_service.delete_booking(booking_id).await?;
    Ok(DeleteResponse::NoContent)
}
