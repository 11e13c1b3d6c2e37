// Authentication service - business logic layer

use tracing::{debug, info, warn};

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{LoginRequest, RegisterRequest, User, UserResponse},
    password::{hash_password, verify_password},
    repository::UserRepository,
    token::TokenService,
};

/// Minimum accepted password length, in characters.
const MIN_PASSWORD_CHARS: usize = 6;

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Coordinates registration, login, and bearer-token authentication
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user.
    ///
    /// Never returns anything sensitive; callers respond with a message only.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let (Some(name), Some(email), Some(password)) = (
            present(&request.name),
            present(&request.email),
            present(&request.password),
        ) else {
            return Err(AuthError::Validation(
                "Name, email and password are required".to_string(),
            ));
        };

        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.user_repo.email_exists(email).await? {
            warn!(email, "registration with already-used email");
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let user = self.user_repo.create_user(name, email, &password_hash).await?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Log a user in, returning a bearer token and the public projection.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response never reveals which emails are registered.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, UserResponse), AuthError> {
        let (Some(email), Some(password)) =
            (present(&request.email), present(&request.password))
        else {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            debug!("login with unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(user_id = user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(user.id)?;
        info!(user_id = user.id, "user logged in");
        Ok((token, user.into()))
    }

    /// Resolve a bearer token to its user. Steps are strictly ordered:
    /// verify the token first, then resolve the subject against the user
    /// store, so a structurally valid token for a deleted user is rejected.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.token_service.verify(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}
