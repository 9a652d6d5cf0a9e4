//! Tests for `ApiError` → HTTP response mapping. No server needed; they call
//! `IntoResponse` directly on error values, the way the handlers surface them.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use attendance::services::attendance_service::AttendanceError;
use attendance::web::error::ApiError;

async fn error_to_response(err: ApiError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn activity_not_found_maps_to_404() {
    let (status, json) = error_to_response(AttendanceError::ActivityNotFound.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "activity not found");
}

#[tokio::test]
async fn session_not_found_maps_to_404() {
    let (status, json) = error_to_response(AttendanceError::SessionNotFound.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "device session not found");
}

#[tokio::test]
async fn identity_mismatch_maps_to_400() {
    let (status, _json) = error_to_response(AttendanceError::IdentityMismatch.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_checkin_and_checkout_map_to_409() {
    let (status, _) = error_to_response(AttendanceError::AlreadyCheckedIn.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = error_to_response(AttendanceError::AlreadyCheckedOut.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn storage_failures_map_to_500_without_detail() {
    let err: ApiError = AttendanceError::Storage(sqlx::Error::PoolTimedOut).into();
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // The body must not leak anything beyond a generic message.
    assert_eq!(json["detail"], "internal error");
}
