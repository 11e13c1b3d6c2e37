use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::response::EmptyData;
use crate::validation::format_entry_date;

/// Domain model representing a mood entry in the database
#[derive(Debug, Clone, FromRow)]
pub struct MoodEntry {
    pub id: i32,
    pub user_id: i32,
    pub mood: String,
    pub notes: Option<String>,
    pub entry_date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a new mood entry.
///
/// `mood` and `entry_date` are required by the endpoint but optional here so
/// a missing field becomes a domain validation error, not a serde rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMoodEntryRequest {
    #[validate(length(max = 50, message = "Mood must not exceed 50 characters"))]
    pub mood: Option<String>,
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes: Option<String>,
    pub entry_date: Option<String>,
}

/// Deserializes a present value (including an explicit null) as `Some`,
/// so an absent key stays distinguishable from `null`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Request DTO for partially updating a mood entry.
///
/// `notes` is tri-state: absent keeps the stored value, an explicit null
/// clears it, a string overwrites it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMoodEntryRequest {
    #[validate(length(max = 50, message = "Mood must not exceed 50 characters"))]
    pub mood: Option<String>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    pub entry_date: Option<String>,
}

impl UpdateMoodEntryRequest {
    /// True when the patch carries none of the recognized fields.
    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.notes.is_none() && self.entry_date.is_none()
    }
}

/// Response DTO for a single mood entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct MoodEntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub mood: String,
    pub notes: Option<String>,
    /// Canonical `YYYY-MM-DD HH:MM:SS` representation
    pub entry_date: String,
    pub created_at: DateTime<Utc>,
}

impl From<MoodEntry> for MoodEntryResponse {
    fn from(entry: MoodEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            mood: entry.mood,
            notes: entry.notes,
            entry_date: format_entry_date(&entry.entry_date),
            created_at: entry.created_at,
        }
    }
}

/// Envelope for the list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct MoodListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<MoodEntryResponse>,
}

/// Envelope for single-entry responses (create, update)
#[derive(Debug, Serialize, ToSchema)]
pub struct MoodEntryEnvelope {
    pub success: bool,
    pub data: MoodEntryResponse,
}

/// Envelope for successful deletes: `{success: true, data: {}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct MoodDeletedResponse {
    pub success: bool,
    pub data: EmptyData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_entry_date;

    #[test]
    fn response_renders_canonical_entry_date() {
        let entry = MoodEntry {
            id: 1,
            user_id: 2,
            mood: "happy".to_string(),
            notes: None,
            entry_date: parse_entry_date("2024-01-01T10:00:00Z").unwrap(),
            created_at: Utc::now(),
        };

        let response = MoodEntryResponse::from(entry);
        assert_eq!(response.entry_date, "2024-01-01 10:00:00");
    }

    #[test]
    fn patch_with_no_recognized_field_is_empty() {
        let patch: UpdateMoodEntryRequest = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: UpdateMoodEntryRequest =
            serde_json::from_value(serde_json::json!({"unrelated": 1})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn absent_notes_differs_from_explicit_null() {
        let absent: UpdateMoodEntryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);

        let cleared: UpdateMoodEntryRequest =
            serde_json::from_value(serde_json::json!({"notes": null})).unwrap();
        assert_eq!(cleared.notes, Some(None));
        assert!(!cleared.is_empty());

        let replaced: UpdateMoodEntryRequest =
            serde_json::from_value(serde_json::json!({"notes": "slept badly"})).unwrap();
        assert_eq!(replaced.notes, Some(Some("slept badly".to_string())));
    }

    #[test]
    fn deleted_envelope_shape() {
        let json = serde_json::to_value(MoodDeletedResponse {
            success: true,
            data: EmptyData {},
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": {}}));
    }
}
