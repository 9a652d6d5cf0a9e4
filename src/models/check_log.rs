use chrono::{DateTime, Utc};

/// One participant's attendance record for one activity. Check-out fields are
/// either all NULL (checked in only) or all set (checked out).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckLogRow {
    pub id: i64,
    pub activity_id: i64,
    pub participant_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_in_latitude: f64,
    pub check_in_longitude: f64,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_out_latitude: Option<f64>,
    pub check_out_longitude: Option<f64>,
    pub device_session_token: String,
}

/// A check log resolved by device session token, joined with the fields of
/// its activity the check-out workflow needs (window, geofence center,
/// radius). Activity coordinates are still obfuscated here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckLogSessionRow {
    pub id: i64,
    pub check_out_time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
