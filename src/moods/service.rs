// Business logic for mood entries

use tracing::{debug, info};

use crate::moods::{
    error::MoodError,
    models::{CreateMoodEntryRequest, MoodEntry, UpdateMoodEntryRequest},
    repository::MoodEntryRepository,
};
use crate::validation::parse_entry_date;

/// Service for mood entry operations
#[derive(Clone)]
pub struct MoodEntryService {
    repo: MoodEntryRepository,
}

impl MoodEntryService {
    /// Create a new MoodEntryService
    pub fn new(repo: MoodEntryRepository) -> Self {
        Self { repo }
    }

    /// List all entries owned by the user, most recent entry date first.
    /// An empty list is a valid success.
    pub async fn list(&self, user_id: i32) -> Result<Vec<MoodEntry>, MoodError> {
        let entries = self.repo.list_by_user(user_id).await?;
        debug!(user_id, count = entries.len(), "listed mood entries");
        Ok(entries)
    }

    /// Create a new entry for the user.
    ///
    /// `mood` and `entry_date` are required; the date is normalized to the
    /// canonical second-precision form before storage.
    pub async fn add(
        &self,
        user_id: i32,
        request: CreateMoodEntryRequest,
    ) -> Result<MoodEntry, MoodError> {
        let mood = request
            .mood
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        let raw_date = request
            .entry_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let (Some(mood), Some(raw_date)) = (mood, raw_date) else {
            return Err(MoodError::Validation(
                "Mood and entry date are required".to_string(),
            ));
        };

        let entry_date = parse_entry_date(raw_date)
            .ok_or_else(|| MoodError::Validation("Invalid date format".to_string()))?;

        let entry = self
            .repo
            .insert(user_id, mood, request.notes.as_deref(), entry_date)
            .await?;

        info!(user_id, entry_id = entry.id, "mood entry created");
        Ok(entry)
    }

    /// Apply a partial update to one of the user's entries.
    ///
    /// All supplied fields are validated before anything is written, so an
    /// invalid date never leaves a half-applied patch behind.
    pub async fn update(
        &self,
        user_id: i32,
        entry_id: i32,
        request: UpdateMoodEntryRequest,
    ) -> Result<MoodEntry, MoodError> {
        if request.is_empty() {
            return Err(MoodError::Validation("No fields to update".to_string()));
        }

        let mood = match &request.mood {
            Some(m) => {
                let m = m.trim();
                if m.is_empty() {
                    return Err(MoodError::Validation("Mood cannot be empty".to_string()));
                }
                Some(m.to_string())
            }
            None => None,
        };

        let entry_date = match &request.entry_date {
            Some(raw) => Some(
                parse_entry_date(raw)
                    .ok_or_else(|| MoodError::Validation("Invalid date format".to_string()))?,
            ),
            None => None,
        };

        let updated = self
            .repo
            .update_fields(entry_id, user_id, mood, request.notes, entry_date)
            .await?
            .ok_or(MoodError::NotFound)?;

        info!(user_id, entry_id, "mood entry updated");
        Ok(updated)
    }

    /// Delete one of the user's entries.
    pub async fn delete(&self, user_id: i32, entry_id: i32) -> Result<(), MoodError> {
        if !self.repo.delete_for_user(entry_id, user_id).await? {
            return Err(MoodError::NotFound);
        }

        info!(user_id, entry_id, "mood entry deleted");
        Ok(())
    }
}
