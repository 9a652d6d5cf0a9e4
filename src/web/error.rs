use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::models::attendance_api_models::RejectionBody;
use crate::services::activity_admin_service::ActivityAdminError;
use crate::services::admin_auth_service::AuthError;
use crate::services::attendance_service::AttendanceError;

/// Web-layer error: every hard failure a handler can surface, with its HTTP
/// status. Soft business outcomes (time window, geofence) are not errors and
/// never pass through here; handlers turn those into 422 bodies directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("internal error")]
    Internal,
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::ActivityNotFound | AttendanceError::SessionNotFound => {
                ApiError::NotFound(err.to_string())
            }
            AttendanceError::IdentityMismatch => ApiError::BadRequest(err.to_string()),
            AttendanceError::AlreadyCheckedIn | AttendanceError::AlreadyCheckedOut => {
                ApiError::Conflict(err.to_string())
            }
            AttendanceError::Transform(e) => {
                error!("Coordinate transform failed: {}", e);
                ApiError::Internal
            }
            AttendanceError::Storage(e) => {
                error!("Attendance storage failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Storage(e) => {
                error!("Auth storage failure: {}", e);
                ApiError::Internal
            }
            AuthError::PasswordHash => {
                error!("Password hash failure during login");
                ApiError::Internal
            }
        }
    }
}

impl From<ActivityAdminError> for ApiError {
    fn from(err: ActivityAdminError) -> Self {
        match err {
            ActivityAdminError::NotFound => ApiError::NotFound(err.to_string()),
            ActivityAdminError::InvalidWindow => ApiError::BadRequest(err.to_string()),
            ActivityAdminError::Storage(e) => {
                error!("Activity admin storage failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, detail),
            ApiError::Unauthorized(detail) => (StatusCode::UNAUTHORIZED, detail),
            // Internal detail stays in the log, never in the response body.
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };
        (
            status,
            Json(RejectionBody {
                detail,
                distance_meters: None,
            }),
        )
            .into_response()
    }
}
