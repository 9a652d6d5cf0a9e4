use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct CheckInRequest {
    pub activity_code: String,
    pub student_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckInResponse {
    pub message: String,
    pub device_session_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckOutRequest {
    pub device_session_token: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckOutResponse {
    pub message: String,
}

/// Body for every rejected request. `distance_meters` is only present on
/// geofence misses so the caller can show how far off the participant was.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RejectionBody {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActivityDetails {
    pub name: String,
    pub location_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminLoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CreateActivityRequest {
    pub name: String,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ActivityTimeUpdateRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ActivityResponse {
    pub unique_code: String,
    pub name: String,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
