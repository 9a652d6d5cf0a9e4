use sqlx::SqlitePool;

use crate::models::AdminRow;

const SQL_GET_ADMIN_BY_USERNAME: &str = r#"
SELECT id, username, hashed_password
FROM admins
WHERE username = ?
"#;

pub async fn get_admin_by_username(
    pool: &SqlitePool,
    username: &str,
) -> sqlx::Result<Option<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_GET_ADMIN_BY_USERNAME)
        .bind(username)
        .fetch_optional(pool)
        .await
}

const SQL_UPSERT_ADMIN: &str = r#"
INSERT INTO admins (username, hashed_password)
VALUES (?, ?)
ON CONFLICT (username) DO UPDATE SET hashed_password = excluded.hashed_password
"#;

pub async fn upsert_admin(
    pool: &SqlitePool,
    username: &str,
    hashed_password: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPSERT_ADMIN)
        .bind(username)
        .bind(hashed_password)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
