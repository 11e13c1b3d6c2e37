// JWT issuance and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::error::AuthError;

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// JWT claims: the token carries only the user id plus the time bounds.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user id
    pub iat: i64, // issued at (unix timestamp)
    pub exp: i64, // expires at (unix timestamp)
}

/// Signs and verifies bearer tokens with a server-held secret.
///
/// Tokens are opaque to clients; expiration is the only lifetime bound,
/// there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    token_ttl: i64, // seconds
}

impl TokenService {
    /// Create a TokenService with the default one-day expiry.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            token_ttl: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Create a TokenService with an explicit expiry in seconds.
    pub fn with_ttl(secret: String, token_ttl: i64) -> Self {
        Self { secret, token_ttl }
    }

    /// Issue a signed token for the given user id.
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_ttl,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        debug!(user_id, "token issued");
        Ok(token)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::TokenFailed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn default_expiration_is_one_day() {
        let service = test_token_service();
        let token = service.issue(1).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn issue_and_verify_roundtrip_preserves_user_id() {
        let service = test_token_service();
        let token = service.issue(42).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("invalid_token_format").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let service1 = TokenService::new("secret1".to_string());
        let service2 = TokenService::new("secret2".to_string());

        let token = service1.issue(1).unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(matches!(
            service2.verify(&token).unwrap_err(),
            AuthError::TokenFailed
        ));
    }

    #[test]
    fn expired_tokens_are_rejected_as_expired() {
        // Hand-craft a token that expired well outside the validation leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iat: now - 1_000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let err = test_token_service().verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_preserves_any_user_id(user_id in 1i32..1_000_000) {
            let service = test_token_service();
            let token = service.issue(user_id)?;
            let claims = service.verify(&token)?;
            prop_assert_eq!(claims.sub, user_id);
        }

        #[test]
        fn prop_expiration_matches_configured_ttl(
            user_id in 1i32..1_000_000,
            ttl in 60i64..604_800,
        ) {
            let service = TokenService::with_ttl("per-test-secret".to_string(), ttl);
            let token = service.issue(user_id)?;
            let claims = service.verify(&token)?;
            prop_assert_eq!(claims.exp - claims.iat, ttl);
        }

        #[test]
        fn prop_random_strings_are_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
