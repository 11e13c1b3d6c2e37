// Error types for mood entry operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for mood entry operations
#[derive(Debug, thiserror::Error)]
pub enum MoodError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Covers both "no such entry" and "entry owned by someone else";
    /// the two are deliberately indistinguishable in the response.
    #[error("Mood entry not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for MoodError {
    fn from(err: sqlx::Error) -> Self {
        MoodError::Database(err.to_string())
    }
}

impl IntoResponse for MoodError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            MoodError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            MoodError::NotFound => (
                StatusCode::NOT_FOUND,
                "Mood entry not found".to_string(),
            ),
            MoodError::Database(msg) => {
                tracing::error!("database error in moods: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
