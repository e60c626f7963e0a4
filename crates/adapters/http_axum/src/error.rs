//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use salonbook_domain::error::{SalonBookError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SalonBookError`] and request-body rejections to an HTTP response
/// with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Service(SalonBookError),
    /// The JSON body could not be read or did not match the expected shape.
    Body(JsonRejection),
}

impl ApiError {
    /// Error for a path or body identifier that failed to parse.
    pub(crate) fn invalid_id(raw: &str) -> Self {
        Self::Service(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl From<SalonBookError> for ApiError {
    fn from(err: SalonBookError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Service(err) => err,
            Self::Body(rejection) => {
                let status = match rejection {
                    JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                return (
                    status,
                    Json(ErrorBody {
                        error: rejection.body_text(),
                    }),
                )
                    .into_response();
            }
        };

        let (status, message) = match &err {
            SalonBookError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SalonBookError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SalonBookError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            SalonBookError::ReferenceExhausted(err) => {
                tracing::warn!(error = %err, "booking reference allocation gave up");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "could not allocate a booking reference, please retry".to_string(),
                )
            }
            SalonBookError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
