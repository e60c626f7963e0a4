//! JSON REST handlers for barbers.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use salonbook_app::ports::{BarberRepository, BookingRepository, OfferingRepository};
use salonbook_app::services::barber_service::BarberChanges;
use salonbook_domain::barber::Barber;
use salonbook_domain::id::BarberId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a barber.
#[derive(Deserialize)]
pub struct CreateBarberRequest {
    pub name: String,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

/// Request body for editing a barber. Absent fields are left unchanged.
#[derive(Deserialize)]
pub struct UpdateBarberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

/// Query string for the list endpoint.
#[derive(Deserialize, Default)]
pub struct ListQuery {
    /// When `true`, only barbers customers can currently book.
    #[serde(default)]
    pub active: bool,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Barber>>),
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
    Ok(Json<Barber>),
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
    Created(Json<Barber>),
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

/// `GET /api/barbers`
pub async fn list<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let barbers = state.barber_service.list_barbers(query.active).await?;
    Ok(ListResponse::Ok(Json(barbers)))
}

/// `GET /api/barbers/:id`
pub async fn get<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let barber_id = BarberId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    let barber = state.barber_service.get_barber(barber_id).await?;
    Ok(GetResponse::Ok(Json(barber)))
}

/// `POST /api/barbers`
pub async fn create<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    payload: Result<Json<CreateBarberRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let mut builder = Barber::builder().name(req.name);
    if let Some(phone) = req.phone {
        builder = builder.phone(phone);
    }
    if let Some(active) = req.active {
        builder = builder.active(active);
    }

    let barber = builder.build()?;
    let created = state.barber_service.create_barber(barber).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/barbers/:id`
pub async fn update<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBarberRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let barber_id = BarberId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    let changes = BarberChanges {
        name: req.name,
        phone: req.phone,
        active: req.active,
    };
    let updated = state.barber_service.update_barber(barber_id, changes).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/barbers/:id`
pub async fn delete<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let barber_id = BarberId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    state.barber_service.delete_barber(barber_id).await?;
    Ok(DeleteResponse::NoContent)
}
