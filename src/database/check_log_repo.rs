use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{CheckLogRow, CheckLogSessionRow};

const SQL_GET_CHECK_LOG: &str = r#"
SELECT
  id,
  activity_id,
  participant_id,
  check_in_time,
  check_in_latitude,
  check_in_longitude,
  check_out_time,
  check_out_latitude,
  check_out_longitude,
  device_session_token
FROM check_logs
WHERE participant_id = ? AND activity_id = ?
"#;

pub async fn get_check_log(
    pool: &SqlitePool,
    participant_id: i64,
    activity_id: i64,
) -> sqlx::Result<Option<CheckLogRow>> {
    sqlx::query_as::<_, CheckLogRow>(SQL_GET_CHECK_LOG)
        .bind(participant_id)
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_CHECK_LOG: &str = r#"
INSERT INTO check_logs (
  activity_id,
  participant_id,
  check_in_time,
  check_in_latitude,
  check_in_longitude,
  device_session_token
) VALUES (?, ?, ?, ?, ?, ?)
"#;

pub struct NewCheckLog<'a> {
    pub activity_id: i64,
    pub participant_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_in_latitude: f64,
    pub check_in_longitude: f64,
    pub device_session_token: &'a str,
}

/// Insert a fresh check-in record. A `UNIQUE (activity_id, participant_id)`
/// violation means another request for the same pair committed first; callers
/// inspect the database error for that case instead of pre-locking.
pub async fn insert_check_log(pool: &SqlitePool, log: NewCheckLog<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_CHECK_LOG)
        .bind(log.activity_id)
        .bind(log.participant_id)
        .bind(log.check_in_time)
        .bind(log.check_in_latitude)
        .bind(log.check_in_longitude)
        .bind(log.device_session_token)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_GET_LOG_BY_TOKEN: &str = r#"
SELECT
  cl.id,
  cl.check_out_time,
  a.latitude,
  a.longitude,
  a.radius_meters,
  a.start_time,
  a.end_time
FROM check_logs cl
JOIN activities a ON a.id = cl.activity_id
WHERE cl.device_session_token = ?
"#;

pub async fn get_log_by_token(
    pool: &SqlitePool,
    device_session_token: &str,
) -> sqlx::Result<Option<CheckLogSessionRow>> {
    sqlx::query_as::<_, CheckLogSessionRow>(SQL_GET_LOG_BY_TOKEN)
        .bind(device_session_token)
        .fetch_optional(pool)
        .await
}

const SQL_UPDATE_CHECK_LOG_CHECKOUT: &str = r#"
UPDATE check_logs
SET check_out_time = ?, check_out_latitude = ?, check_out_longitude = ?
WHERE id = ? AND check_out_time IS NULL
"#;

/// Record the check-out. The `check_out_time IS NULL` guard makes the update
/// a no-op when another request already checked this log out, so the three
/// check-out fields are only ever written once, together.
pub async fn update_check_log_checkout(
    pool: &SqlitePool,
    log_id: i64,
    check_out_time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_CHECK_LOG_CHECKOUT)
        .bind(check_out_time)
        .bind(latitude)
        .bind(longitude)
        .bind(log_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
