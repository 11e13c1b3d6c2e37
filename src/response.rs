// Shared success-envelope types
// Every endpoint responds with `{success, ...}`; errors produce
// `{success: false, message}` through the per-module error types.

use serde::Serialize;
use utoipa::ToSchema;

/// Success response carrying only a human-readable message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Serializes as `{}`, used as the payload of successful deletes
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("User registered")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "User registered"})
        );
    }

    #[test]
    fn empty_data_serializes_to_empty_object() {
        let json = serde_json::to_value(EmptyData {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
