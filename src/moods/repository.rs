use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::moods::{error::MoodError, models::MoodEntry};

/// Repository for database operations on mood entries.
///
/// Every read and write here is keyed by `(id, user_id)` so a caller can
/// never observe or touch another user's rows.
#[derive(Clone)]
pub struct MoodEntryRepository {
    pool: PgPool,
}

impl MoodEntryRepository {
    /// Create a new MoodEntryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All entries owned by a user, most recent entry date first
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<MoodEntry>, MoodError> {
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, user_id, mood, notes, entry_date, created_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY entry_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Insert a new entry for a user
    pub async fn insert(
        &self,
        user_id: i32,
        mood: &str,
        notes: Option<&str>,
        entry_date: NaiveDateTime,
    ) -> Result<MoodEntry, MoodError> {
        let entry = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (user_id, mood, notes, entry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, mood, notes, entry_date, created_at
            "#,
        )
        .bind(user_id)
        .bind(mood)
        .bind(notes)
        .bind(entry_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Apply a partial update to an entry the user owns.
    ///
    /// The ownership-filtered read and the write run in one transaction so a
    /// concurrent delete cannot slip between them. Returns `None` when the
    /// entry does not exist or belongs to another user.
    pub async fn update_fields(
        &self,
        entry_id: i32,
        user_id: i32,
        mood: Option<String>,
        notes: Option<Option<String>>,
        entry_date: Option<NaiveDateTime>,
    ) -> Result<Option<MoodEntry>, MoodError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, user_id, mood, notes, entry_date, created_at
            FROM mood_entries
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        // Supplied fields overwrite, omitted fields keep their stored value;
        // notes carries its tri-state through (Some(None) clears the column)
        let mood = mood.unwrap_or(existing.mood);
        let notes = notes.unwrap_or(existing.notes);
        let entry_date = entry_date.unwrap_or(existing.entry_date);

        let updated = sqlx::query_as::<_, MoodEntry>(
            r#"
            UPDATE mood_entries
            SET mood = $1, notes = $2, entry_date = $3
            WHERE id = $4
            RETURNING id, user_id, mood, notes, entry_date, created_at
            "#,
        )
        .bind(mood)
        .bind(notes)
        .bind(entry_date)
        .bind(entry_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    /// Delete an entry the user owns.
    ///
    /// A single conditional statement; the affected-row count is the
    /// ownership check. Returns false when nothing matched.
    pub async fn delete_for_user(&self, entry_id: i32, user_id: i32) -> Result<bool, MoodError> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
