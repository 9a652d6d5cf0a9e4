use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use tracing::info;

use crate::models::attendance_api_models::{
    ActivityResponse, ActivityTimeUpdateRequest, AdminLoginRequest, AdminLoginResponse,
    CreateActivityRequest,
};
use crate::models::ActivityLogRow;
use crate::services::{activity_admin_service, admin_auth_service};
use crate::web::error::ApiError;
use crate::web::middleware::auth::AuthenticatedAdmin;
use crate::web::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(form): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let access_token =
        admin_auth_service::login(&state.pool, &state.settings, &form.username, &form.password)
            .await?;
    info!("Admin login: {}", form.username);
    Ok(Json(AdminLoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn create_activity_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let activity = activity_admin_service::create_activity(&state.pool, &request).await?;
    info!("Activity created: {}", activity.unique_code);
    Ok(Json(activity))
}

pub async fn list_activities_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let activities = activity_admin_service::list_activities(&state.pool).await?;
    Ok(Json(activities))
}

pub async fn update_activity_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(activity_code): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<ActivityTimeUpdateRequest>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let activity = activity_admin_service::update_activity_window(
        &state.pool,
        &activity_code,
        request.start_time,
        request.end_time,
    )
    .await?;
    Ok(Json(activity))
}

#[derive(Serialize)]
pub struct DeleteActivityResponse {
    pub message: String,
}

pub async fn delete_activity_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(activity_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteActivityResponse>, ApiError> {
    activity_admin_service::delete_activity(&state.pool, &activity_code).await?;
    info!("Activity deleted: {}", activity_code);
    Ok(Json(DeleteActivityResponse {
        message: "activity and its attendance records deleted".to_string(),
    }))
}

#[derive(Serialize)]
pub struct ActivityLogsResponse {
    pub activity_name: String,
    pub logs: Vec<ActivityLogRow>,
}

pub async fn activity_logs_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(activity_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ActivityLogsResponse>, ApiError> {
    let view = activity_admin_service::load_activity_logs(&state.pool, &activity_code).await?;
    Ok(Json(ActivityLogsResponse {
        activity_name: view.activity_name,
        logs: view.logs,
    }))
}
