// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, LoginResponse, RegisterRequest},
};
use crate::response::MessageResponse;
use crate::AppState;

/// Register a new user
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields, or email already registered"),
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state.auth_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered")),
    ))
}

/// Log a user in
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let (token, user) = state.auth_service.login(request).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user,
    }))
}
