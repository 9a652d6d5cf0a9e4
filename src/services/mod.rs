pub mod activity_admin_service;
pub mod admin_auth_service;
pub mod attendance_service;
pub mod coord_service;
pub mod geo_service;
