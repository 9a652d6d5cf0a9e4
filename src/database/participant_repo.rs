use sqlx::SqlitePool;

use crate::models::ParticipantRow;

const SQL_GET_PARTICIPANT: &str = r#"
SELECT id, student_id, name
FROM participants
WHERE student_id = ?
"#;

pub async fn get_participant(
    pool: &SqlitePool,
    student_id: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_GET_PARTICIPANT)
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (student_id, name)
VALUES (?, ?)
ON CONFLICT (student_id) DO NOTHING
"#;

/// Create the participant if it does not exist yet and return the stored row.
///
/// ON CONFLICT DO NOTHING makes this safe under concurrent first check-ins:
/// whichever insert lands first wins, and the follow-up select returns the
/// row as actually stored, so a losing racer still sees the bound name.
pub async fn create_participant(
    pool: &SqlitePool,
    student_id: &str,
    name: &str,
) -> sqlx::Result<ParticipantRow> {
    sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(student_id)
        .bind(name)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, ParticipantRow>(SQL_GET_PARTICIPANT)
        .bind(student_id)
        .fetch_one(pool)
        .await
}
