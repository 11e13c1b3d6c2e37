// HTTP handlers for mood entry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::moods::{
    error::MoodError,
    models::{
        CreateMoodEntryRequest, MoodDeletedResponse, MoodEntryEnvelope, MoodEntryResponse,
        MoodListResponse, UpdateMoodEntryRequest,
    },
};
use crate::response::EmptyData;
use crate::AppState;

/// List the authenticated user's mood entries
/// GET /api/v1/moods
#[utoipa::path(
    get,
    path = "/api/v1/moods",
    responses(
        (status = 200, description = "Entries owned by the caller, newest entry date first", body = MoodListResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "moods"
)]
pub async fn list_mood_entries(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MoodListResponse>, MoodError> {
    let entries = state.mood_service.list(user.user_id).await?;

    let data: Vec<MoodEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(MoodListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// Create a mood entry for the authenticated user
/// POST /api/v1/moods
#[utoipa::path(
    post,
    path = "/api/v1/moods",
    request_body = CreateMoodEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = MoodEntryEnvelope),
        (status = 400, description = "Missing mood/entry date or unparseable date"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "moods"
)]
pub async fn create_mood_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateMoodEntryRequest>,
) -> Result<(StatusCode, Json<MoodEntryEnvelope>), MoodError> {
    request
        .validate()
        .map_err(|e| MoodError::Validation(e.to_string()))?;

    let entry = state.mood_service.add(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MoodEntryEnvelope {
            success: true,
            data: entry.into(),
        }),
    ))
}

/// Partially update one of the authenticated user's mood entries
/// PUT /api/v1/moods/:id
#[utoipa::path(
    put,
    path = "/api/v1/moods/{id}",
    params(("id" = i32, Path, description = "Mood entry ID")),
    request_body = UpdateMoodEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = MoodEntryEnvelope),
        (status = 400, description = "Empty patch or unparseable date"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No such entry owned by the caller"),
    ),
    tag = "moods"
)]
pub async fn update_mood_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(entry_id): Path<i32>,
    Json(request): Json<UpdateMoodEntryRequest>,
) -> Result<Json<MoodEntryEnvelope>, MoodError> {
    request
        .validate()
        .map_err(|e| MoodError::Validation(e.to_string()))?;

    let entry = state
        .mood_service
        .update(user.user_id, entry_id, request)
        .await?;

    Ok(Json(MoodEntryEnvelope {
        success: true,
        data: entry.into(),
    }))
}

/// Delete one of the authenticated user's mood entries
/// DELETE /api/v1/moods/:id
#[utoipa::path(
    delete,
    path = "/api/v1/moods/{id}",
    params(("id" = i32, Path, description = "Mood entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = MoodDeletedResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No such entry owned by the caller"),
    ),
    tag = "moods"
)]
pub async fn delete_mood_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(entry_id): Path<i32>,
) -> Result<Json<MoodDeletedResponse>, MoodError> {
    state.mood_service.delete(user.user_id, entry_id).await?;

    Ok(Json(MoodDeletedResponse {
        success: true,
        data: EmptyData {},
    }))
}
