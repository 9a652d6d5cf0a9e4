use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{password_hash::rand_core::OsRng, Argon2};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::warn;

use crate::config::Settings;
use crate::database::admin_repo;

/// Claims carried by an administrator access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("password hash error")]
    PasswordHash,
}

/// Hash a plaintext password with Argon2id and a random salt, returning the
/// PHC string (parameters and salt embedded).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        warn!("Stored admin password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Verify admin credentials and issue an HS256 access token.
///
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn login(
    pool: &SqlitePool,
    settings: &Settings,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let admin = admin_repo::get_admin_by_username(pool, username).await?;
    let Some(admin) = admin else {
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(password, &admin.hashed_password) {
        return Err(AuthError::InvalidCredentials);
    }

    let now = Utc::now().timestamp();
    let claims = AdminClaims {
        sub: admin.username,
        iat: now,
        exp: now + settings.jwt_expiry_minutes * 60,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Decode and validate an access token, returning its claims.
pub fn decode_token(settings: &Settings, token: &str) -> Result<AdminClaims, AuthError> {
    decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            jwt_expiry_minutes: 60,
        }
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery-staple", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn token_round_trip_preserves_subject() {
        let settings = test_settings();
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "admin".into(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
        )
        .unwrap();

        let decoded = decode_token(&settings, &token).unwrap();
        assert_eq!(decoded.sub, "admin");
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let settings = test_settings();
        let mut other = test_settings();
        other.jwt_secret = "another-secret".into();

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "admin".into(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(other.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(decode_token(&settings, &token).is_err());
    }
}
