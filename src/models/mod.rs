pub mod activity;
pub mod admin;
pub mod attendance_api_models;
pub mod check_log;
pub mod participant;

pub use activity::{ActivityLogRow, ActivityRow};
pub use admin::AdminRow;
pub use check_log::{CheckLogRow, CheckLogSessionRow};
pub use participant::ParticipantRow;
