use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::activity_repo::{self, NewActivity};
use crate::models::attendance_api_models::{ActivityResponse, CreateActivityRequest};
use crate::models::{ActivityLogRow, ActivityRow};

#[derive(Debug, Error)]
pub enum ActivityAdminError {
    #[error("activity not found")]
    NotFound,
    #[error("start time must not be after end time")]
    InvalidWindow,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

fn to_response(row: ActivityRow) -> ActivityResponse {
    ActivityResponse {
        unique_code: row.unique_code,
        name: row.name,
        location_name: row.location_name,
        latitude: row.latitude,
        longitude: row.longitude,
        radius_meters: row.radius_meters,
        start_time: row.start_time,
        end_time: row.end_time,
    }
}

/// Create an activity with a freshly generated opaque code and return the
/// stored record.
pub async fn create_activity(
    pool: &SqlitePool,
    request: &CreateActivityRequest,
) -> Result<ActivityResponse, ActivityAdminError> {
    if request.start_time > request.end_time {
        return Err(ActivityAdminError::InvalidWindow);
    }

    let unique_code = Uuid::new_v4().simple().to_string();
    activity_repo::insert_activity(
        pool,
        NewActivity {
            unique_code: &unique_code,
            name: &request.name,
            location_name: request.location_name.as_deref(),
            latitude: request.latitude,
            longitude: request.longitude,
            radius_meters: request.radius_meters,
            start_time: request.start_time,
            end_time: request.end_time,
        },
    )
    .await?;

    let stored = activity_repo::get_activity_by_code(pool, &unique_code)
        .await?
        .ok_or(ActivityAdminError::NotFound)?;
    Ok(to_response(stored))
}

pub async fn list_activities(
    pool: &SqlitePool,
) -> Result<Vec<ActivityResponse>, ActivityAdminError> {
    let rows = activity_repo::list_activities(pool).await?;
    Ok(rows.into_iter().map(to_response).collect())
}

pub async fn update_activity_window(
    pool: &SqlitePool,
    unique_code: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<ActivityResponse, ActivityAdminError> {
    if start_time > end_time {
        return Err(ActivityAdminError::InvalidWindow);
    }

    let activity = activity_repo::get_activity_by_code(pool, unique_code)
        .await?
        .ok_or(ActivityAdminError::NotFound)?;
    activity_repo::update_activity_time(pool, activity.id, start_time, end_time).await?;

    let stored = activity_repo::get_activity_by_code(pool, unique_code)
        .await?
        .ok_or(ActivityAdminError::NotFound)?;
    Ok(to_response(stored))
}

/// Delete an activity and, via the schema cascade, all of its check logs.
pub async fn delete_activity(
    pool: &SqlitePool,
    unique_code: &str,
) -> Result<(), ActivityAdminError> {
    let activity = activity_repo::get_activity_by_code(pool, unique_code)
        .await?
        .ok_or(ActivityAdminError::NotFound)?;
    activity_repo::delete_activity(pool, activity.id).await?;
    Ok(())
}

pub struct ActivityLogsView {
    pub activity_name: String,
    pub logs: Vec<ActivityLogRow>,
}

pub async fn load_activity_logs(
    pool: &SqlitePool,
    unique_code: &str,
) -> Result<ActivityLogsView, ActivityAdminError> {
    let activity = activity_repo::get_activity_by_code(pool, unique_code)
        .await?
        .ok_or(ActivityAdminError::NotFound)?;
    let logs = activity_repo::list_check_logs_for_activity(pool, activity.id).await?;
    Ok(ActivityLogsView {
        activity_name: activity.name,
        logs,
    })
}
