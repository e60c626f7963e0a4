//! JSON REST handlers for the service menu.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use salonbook_app::ports::{BarberRepository, BookingRepository, OfferingRepository};
use salonbook_app::services::offering_service::OfferingChanges;
use salonbook_domain::id::OfferingId;
use salonbook_domain::offering::Offering;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding an offering.
#[derive(Deserialize)]
pub struct CreateOfferingRequest {
    pub name: String,
    #[serde(default)]
    pub price_cents: u32,
    pub duration_minutes: u32,
}

/// Request body for editing a menu item. Absent fields are left unchanged.
#[derive(Deserialize)]
pub struct UpdateOfferingRequest {
    pub name: Option<String>,
    pub price_cents: Option<u32>,
    pub duration_minutes: Option<u32>,
}

pub enum ListResponse {
    Ok(Json<Vec<Offering>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum GetResponse {
    Ok(Json<Offering>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum CreateResponse {
    Created(Json<Offering>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

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

/// `GET /api/offerings`
pub async fn list<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
) -> Result<ListResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let offerings = state.offering_service.list_offerings().await?;
    Ok(ListResponse::Ok(Json(offerings)))
}

/// `GET /api/offerings/:id`
pub async fn get<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let offering_id = OfferingId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    let offering = state.offering_service.get_offering(offering_id).await?;
    Ok(GetResponse::Ok(Json(offering)))
}

/// `POST /api/offerings`
pub async fn create<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    payload: Result<Json<CreateOfferingRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let offering = Offering::builder()
        .name(req.name)
        .price_cents(req.price_cents)
        .duration_minutes(req.duration_minutes)
        .build()?;
    let created = state.offering_service.create_offering(offering).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/offerings/:id`
pub async fn update<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOfferingRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let offering_id = OfferingId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    let Json(req) = payload?;
    let changes = OfferingChanges {
        name: req.name,
        price_cents: req.price_cents,
        duration_minutes: req.duration_minutes,
    };
    let updated = state
        .offering_service
        .update_offering(offering_id, changes)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/offerings/:id`
pub async fn delete<BR, OR, KR>(
    State(state): State<AppState<BR, OR, KR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    BR: BarberRepository + Send + Sync + 'static,
    OR: OfferingRepository + Send + Sync + 'static,
    KR: BookingRepository + Send + Sync + 'static,
{
    let offering_id = OfferingId::from_str(&id).map_err(|_| ApiError::invalid_id(&id))?;
    state.offering_service.delete_offering(offering_id).await?;
    Ok(DeleteResponse::NoContent)
}
