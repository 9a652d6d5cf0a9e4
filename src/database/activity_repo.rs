use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{ActivityLogRow, ActivityRow};

const SQL_GET_ACTIVITY_BY_CODE: &str = r#"
SELECT
  id,
  unique_code,
  name,
  location_name,
  latitude,
  longitude,
  radius_meters,
  start_time,
  end_time
FROM activities
WHERE unique_code = ?
"#;

pub async fn get_activity_by_code(
    pool: &SqlitePool,
    unique_code: &str,
) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_GET_ACTIVITY_BY_CODE)
        .bind(unique_code)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  id,
  unique_code,
  name,
  location_name,
  latitude,
  longitude,
  radius_meters,
  start_time,
  end_time
FROM activities
ORDER BY start_time DESC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  unique_code,
  name,
  location_name,
  latitude,
  longitude,
  radius_meters,
  start_time,
  end_time
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewActivity<'a> {
    pub unique_code: &'a str,
    pub name: &'a str,
    pub location_name: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

pub async fn insert_activity(pool: &SqlitePool, activity: NewActivity<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(activity.unique_code)
        .bind(activity.name)
        .bind(activity.location_name)
        .bind(activity.latitude)
        .bind(activity.longitude)
        .bind(activity.radius_meters)
        .bind(activity.start_time)
        .bind(activity.end_time)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_ACTIVITY_TIME: &str = r#"
UPDATE activities
SET start_time = ?, end_time = ?
WHERE id = ?
"#;

pub async fn update_activity_time(
    pool: &SqlitePool,
    activity_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ACTIVITY_TIME)
        .bind(start_time)
        .bind(end_time)
        .bind(activity_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM activities
WHERE id = ?
"#;

pub async fn delete_activity(pool: &SqlitePool, activity_id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(activity_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LIST_CHECK_LOGS_FOR_ACTIVITY: &str = r#"
SELECT
  p.student_id,
  p.name,
  cl.check_in_time,
  cl.check_out_time
FROM check_logs cl
JOIN participants p ON p.id = cl.participant_id
WHERE cl.activity_id = ?
ORDER BY cl.check_in_time ASC
"#;

pub async fn list_check_logs_for_activity(
    pool: &SqlitePool,
    activity_id: i64,
) -> sqlx::Result<Vec<ActivityLogRow>> {
    sqlx::query_as::<_, ActivityLogRow>(SQL_LIST_CHECK_LOGS_FOR_ACTIVITY)
        .bind(activity_id)
        .fetch_all(pool)
        .await
}
