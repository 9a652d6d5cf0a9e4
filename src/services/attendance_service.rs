use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::database::check_log_repo::NewCheckLog;
use crate::database::{activity_repo, check_log_repo, participant_repo};
use crate::models::attendance_api_models::{CheckInRequest, CheckOutRequest};
use crate::services::coord_service::{self, TransformError};
use crate::services::geo_service;

/// Result of a check-in attempt. The two rejection variants are expected
/// business outcomes, not faults: "you are too far away" happens all the
/// time and the caller needs the distance to show the participant.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    Accepted { device_session_token: String },
    NotInWindow,
    OutOfRange { distance_meters: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutOutcome {
    Accepted,
    NotInWindow,
    OutOfRange { distance_meters: i64 },
}

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("activity not found")]
    ActivityNotFound,
    #[error("device session not found")]
    SessionNotFound,
    #[error("student id is already bound to a different name")]
    IdentityMismatch,
    #[error("participant already checked in to this activity")]
    AlreadyCheckedIn,
    #[error("device session already checked out")]
    AlreadyCheckedOut,
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Distance in meters between an activity's stored center and a reported
/// position, both given in the obfuscated system. Both pairs go through the
/// coordinate transform so the haversine runs on true geodetic points.
fn geofence_distance(
    center_lon: f64,
    center_lat: f64,
    reported_lon: f64,
    reported_lat: f64,
) -> Result<f64, TransformError> {
    let (act_lon, act_lat) = coord_service::gcj02_to_wgs84(center_lon, center_lat)?;
    let (req_lon, req_lat) = coord_service::gcj02_to_wgs84(reported_lon, reported_lat)?;
    geo_service::distance_meters(act_lat, act_lon, req_lat, req_lon)
}

/// Run the check-in state machine for one request.
///
/// `now` is sampled once by the caller and reused for every time comparison
/// and for the stored check-in time, so a slow validation step cannot make
/// the window checks disagree with what gets persisted.
pub async fn check_in(
    pool: &SqlitePool,
    request: &CheckInRequest,
    now: DateTime<Utc>,
) -> Result<CheckInOutcome, AttendanceError> {
    let activity = activity_repo::get_activity_by_code(pool, &request.activity_code)
        .await?
        .ok_or(AttendanceError::ActivityNotFound)?;

    if now < activity.start_time || now > activity.end_time {
        return Ok(CheckInOutcome::NotInWindow);
    }

    let distance = geofence_distance(
        activity.longitude,
        activity.latitude,
        request.longitude,
        request.latitude,
    )?;
    if !geo_service::within_radius(distance, activity.radius_meters) {
        return Ok(CheckInOutcome::OutOfRange {
            distance_meters: distance.round() as i64,
        });
    }

    let participant = match participant_repo::get_participant(pool, &request.student_id).await? {
        Some(existing) => existing,
        None => participant_repo::create_participant(pool, &request.student_id, &request.name).await?,
    };
    // Covers both a pre-existing binding and a lost creation race: the stored
    // name is authoritative either way.
    if participant.name != request.name {
        return Err(AttendanceError::IdentityMismatch);
    }

    // Fast path; the unique constraint below is the authority under races.
    if check_log_repo::get_check_log(pool, participant.id, activity.id)
        .await?
        .is_some()
    {
        return Err(AttendanceError::AlreadyCheckedIn);
    }

    let token = Uuid::new_v4().simple().to_string();
    let insert = check_log_repo::insert_check_log(
        pool,
        NewCheckLog {
            activity_id: activity.id,
            participant_id: participant.id,
            check_in_time: now,
            check_in_latitude: request.latitude,
            check_in_longitude: request.longitude,
            device_session_token: &token,
        },
    )
    .await;

    match insert {
        Ok(_) => {
            info!(
                "Check-in accepted: activity={} student={}",
                activity.unique_code, participant.student_id
            );
            Ok(CheckInOutcome::Accepted {
                device_session_token: token,
            })
        }
        Err(e) => Err(map_checkin_insert_error(e)),
    }
}

/// Classify a failed check-log insert. A unique violation means a concurrent
/// check-in for the same (activity, participant) pair committed between our
/// pre-check and the insert; anything else is a storage fault.
fn map_checkin_insert_error(err: sqlx::Error) -> AttendanceError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AttendanceError::AlreadyCheckedIn,
        other => AttendanceError::Storage(other),
    }
}

/// Run the check-out state machine for one request. The device session token
/// issued at check-in is the sole capability required here.
pub async fn check_out(
    pool: &SqlitePool,
    request: &CheckOutRequest,
    now: DateTime<Utc>,
) -> Result<CheckOutOutcome, AttendanceError> {
    let session = check_log_repo::get_log_by_token(pool, &request.device_session_token)
        .await?
        .ok_or(AttendanceError::SessionNotFound)?;

    if session.check_out_time.is_some() {
        return Err(AttendanceError::AlreadyCheckedOut);
    }

    if now < session.start_time || now > session.end_time {
        return Ok(CheckOutOutcome::NotInWindow);
    }

    let distance = geofence_distance(
        session.longitude,
        session.latitude,
        request.longitude,
        request.latitude,
    )?;
    if !geo_service::within_radius(distance, session.radius_meters) {
        return Ok(CheckOutOutcome::OutOfRange {
            distance_meters: distance.round() as i64,
        });
    }

    let updated = check_log_repo::update_check_log_checkout(
        pool,
        session.id,
        now,
        request.latitude,
        request.longitude,
    )
    .await?;
    // Zero rows means a concurrent check-out won between our read and write.
    if updated == 0 {
        return Err(AttendanceError::AlreadyCheckedOut);
    }

    info!("Check-out accepted: log_id={}", session.id);
    Ok(CheckOutOutcome::Accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::database;
    use crate::database::activity_repo::NewActivity;

    /// Two inserts for the same (activity, participant) pair: the second one
    /// must die on the unique constraint, and the workflow must read that
    /// failure as a duplicate check-in. This is the path a lost commit race
    /// takes, where the pre-check saw nothing.
    #[tokio::test]
    async fn losing_a_commit_race_reads_as_already_checked_in() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        database::init_schema(&pool).await.expect("schema");

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        activity_repo::insert_activity(
            &pool,
            NewActivity {
                unique_code: "A1",
                name: "Orientation lecture",
                location_name: None,
                latitude: 39.9087,
                longitude: 116.3975,
                radius_meters: 50.0,
                start_time: now,
                end_time: now + chrono::Duration::seconds(3600),
            },
        )
        .await
        .expect("seed activity");
        let participant = participant_repo::create_participant(&pool, "S1001", "Alice")
            .await
            .expect("participant");

        let first = check_log_repo::insert_check_log(
            &pool,
            NewCheckLog {
                activity_id: 1,
                participant_id: participant.id,
                check_in_time: now,
                check_in_latitude: 39.9087,
                check_in_longitude: 116.3975,
                device_session_token: "token-one",
            },
        )
        .await;
        assert_matches!(first, Ok(1));

        // Distinct token, same pair: only the pair constraint can object.
        let second = check_log_repo::insert_check_log(
            &pool,
            NewCheckLog {
                activity_id: 1,
                participant_id: participant.id,
                check_in_time: now,
                check_in_latitude: 39.9087,
                check_in_longitude: 116.3975,
                device_session_token: "token-two",
            },
        )
        .await;

        let err = second.expect_err("second insert for the same pair must fail");
        match &err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("expected a database error, got {other:?}"),
        }
        assert_matches!(
            map_checkin_insert_error(err),
            AttendanceError::AlreadyCheckedIn
        );
    }
}
