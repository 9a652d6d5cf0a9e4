use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub mod activity_repo;
pub mod admin_repo;
pub mod check_log_repo;
pub mod participant_repo;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

const SQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  unique_code TEXT NOT NULL UNIQUE,
  name TEXT NOT NULL,
  location_name TEXT,
  latitude REAL NOT NULL,
  longitude REAL NOT NULL,
  radius_meters REAL NOT NULL,
  start_time TEXT NOT NULL,
  end_time TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS participants (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  student_id TEXT NOT NULL UNIQUE,
  name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS check_logs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  activity_id INTEGER NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
  participant_id INTEGER NOT NULL REFERENCES participants(id),
  check_in_time TEXT NOT NULL,
  check_in_latitude REAL NOT NULL,
  check_in_longitude REAL NOT NULL,
  check_out_time TEXT,
  check_out_latitude REAL,
  check_out_longitude REAL,
  device_session_token TEXT NOT NULL UNIQUE,
  UNIQUE (activity_id, participant_id)
);

CREATE TABLE IF NOT EXISTS admins (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT NOT NULL UNIQUE,
  hashed_password TEXT NOT NULL
);
"#;

/// Create all tables if they do not exist yet. Idempotent.
///
/// The UNIQUE constraints on check_logs are load-bearing: the attendance
/// workflow relies on the (activity_id, participant_id) constraint to reject
/// concurrent duplicate check-ins, and on the token constraint so a device
/// session token can never resolve to two records.
pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::raw_sql(SQL_SCHEMA).execute(pool).await?;
    Ok(())
}
