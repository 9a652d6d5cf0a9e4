use chrono::{DateTime, Utc};

/// One scheduled activity. Coordinates are stored in the obfuscated (GCJ-02)
/// system exactly as supplied at creation time; the attendance workflow
/// converts them before measuring distance.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub unique_code: String,
    pub name: String,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// One attendance record joined with the participant's identity, as listed
/// on the admin log view for an activity.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct ActivityLogRow {
    pub student_id: String,
    pub name: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
}
