use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::database::activity_repo;
use crate::models::attendance_api_models::{
    ActivityDetails, CheckInRequest, CheckInResponse, CheckOutRequest, CheckOutResponse,
    RejectionBody,
};
use crate::services::attendance_service::{self, CheckInOutcome, CheckOutOutcome};
use crate::web::error::ApiError;
use crate::web::AppState;

/// Soft validation misses (time window, geofence) are expected outcomes, not
/// faults. They get 422 with a descriptive body, so callers can tell
/// rejection from success by status alone.
fn soft_rejection(detail: String, distance_meters: Option<i64>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(RejectionBody {
            detail,
            distance_meters,
        }),
    )
        .into_response()
}

/// Public activity details for the check-in page.
pub async fn activity_details_handler(
    Path(activity_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ActivityDetails>, ApiError> {
    let activity = activity_repo::get_activity_by_code(&state.pool, &activity_code)
        .await
        .map_err(|e| {
            tracing::error!("Activity lookup failed: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("activity not found".to_string()))?;

    Ok(Json(ActivityDetails {
        name: activity.name,
        location_name: activity.location_name,
        start_time: activity.start_time,
        end_time: activity.end_time,
        latitude: activity.latitude,
        longitude: activity.longitude,
        radius_meters: activity.radius_meters,
    }))
}

pub async fn checkin_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    let outcome = attendance_service::check_in(&state.pool, &request, now).await?;

    Ok(match outcome {
        CheckInOutcome::Accepted {
            device_session_token,
        } => Json(CheckInResponse {
            message: "check-in recorded".to_string(),
            device_session_token,
        })
        .into_response(),
        CheckInOutcome::NotInWindow => soft_rejection("not in active window".to_string(), None),
        CheckInOutcome::OutOfRange { distance_meters } => soft_rejection(
            format!("out of range (distance {distance_meters} m)"),
            Some(distance_meters),
        ),
    })
}

pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckOutRequest>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    let outcome = attendance_service::check_out(&state.pool, &request, now).await?;

    Ok(match outcome {
        CheckOutOutcome::Accepted => Json(CheckOutResponse {
            message: "check-out recorded".to_string(),
        })
        .into_response(),
        CheckOutOutcome::NotInWindow => soft_rejection("not in active window".to_string(), None),
        CheckOutOutcome::OutOfRange { distance_meters } => soft_rejection(
            format!("out of range (distance {distance_meters} m)"),
            Some(distance_meters),
        ),
    })
}
