// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Error types for registration, login, and the token gateway
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token verification failed")]
    TokenFailed,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token subject does not resolve to a user")]
    UserNotFound,

    #[error("Password hashing error")]
    PasswordHash,

    #[error("Token creation error: {0}")]
    TokenCreation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            // The endpoint contract fixes duplicate-email at 400, not 409
            AuthError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "Email already registered".to_string(),
            ),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthError::MissingToken => {
                warn!("request to protected route without bearer token");
                (
                    StatusCode::UNAUTHORIZED,
                    "Not authorized to access this route (no token)".to_string(),
                )
            }
            // Expired and otherwise-invalid tokens are indistinguishable to
            // the client; only the server-side log tells them apart.
            AuthError::TokenFailed => {
                warn!("token verification failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "Not authorized to access this route (token failed)".to_string(),
                )
            }
            AuthError::ExpiredToken => {
                warn!("expired token presented");
                (
                    StatusCode::UNAUTHORIZED,
                    "Not authorized to access this route (token failed)".to_string(),
                )
            }
            AuthError::UserNotFound => {
                warn!("token subject does not resolve to a user");
                (StatusCode::UNAUTHORIZED, "User not found".to_string())
            }
            AuthError::PasswordHash => {
                error!("password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::TokenCreation(msg) => {
                error!("token creation error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Database(msg) => {
                error!("database error in auth: {}", msg);
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

impl AuthError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenFailed
            | AuthError::ExpiredToken
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHash | AuthError::TokenCreation(_) | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AuthError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn email_taken_is_a_400_not_a_409() {
        let (status, body) = body_json(AuthError::EmailTaken).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn database_errors_never_leak_details() {
        let (status, body) =
            body_json(AuthError::Database("relation users does not exist".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn expired_and_invalid_tokens_are_indistinguishable() {
        let (expired_status, expired_body) = body_json(AuthError::ExpiredToken).await;
        let (failed_status, failed_body) = body_json(AuthError::TokenFailed).await;
        assert_eq!(expired_status, failed_status);
        assert_eq!(expired_body, failed_body);
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            AuthError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::UserNotFound.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::PasswordHash.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
