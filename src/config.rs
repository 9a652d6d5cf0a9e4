use std::env;

/// Immutable process configuration, read from the environment once at startup
/// and passed explicitly to whoever needs it. Nothing in here is global state.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
}

const DEFAULT_JWT_EXPIRY_MINUTES: i64 = 60 * 24;

impl Settings {
    /// Read settings from the environment. Missing required variables abort
    /// startup; this is only called from the binaries.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let jwt_expiry_minutes: i64 = env::var("JWT_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRY_MINUTES);

        Settings {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_expiry_minutes,
        }
    }
}
