mod auth;
mod db;
mod moods;
mod response;
mod validation;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    handlers::{login_handler, register_handler},
    repository::UserRepository,
    service::AuthService,
    token::{TokenService, DEFAULT_TOKEN_TTL_SECS},
};
use moods::{
    handlers::{create_mood_entry, delete_mood_entry, list_mood_entries, update_mood_entry},
    repository::MoodEntryRepository,
    service::MoodEntryService,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        moods::handlers::list_mood_entries,
        moods::handlers::create_mood_entry,
        moods::handlers::update_mood_entry,
        moods::handlers::delete_mood_entry,
    ),
    components(
        schemas(
            auth::models::RegisterRequest,
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            auth::models::UserResponse,
            moods::models::CreateMoodEntryRequest,
            moods::models::UpdateMoodEntryRequest,
            moods::models::MoodEntryResponse,
            moods::models::MoodListResponse,
            moods::models::MoodEntryEnvelope,
            moods::models::MoodDeletedResponse,
            response::MessageResponse,
            response::EmptyData,
        )
    ),
    tags(
        (name = "auth", description = "User registration and login"),
        (name = "moods", description = "Mood journal entries for the authenticated user")
    ),
    info(
        title = "Moodly API",
        version = "1.0.0",
        description = "Personal mood journal API: register, log in, and manage your own mood entries"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: AuthService,
    pub mood_service: MoodEntryService,
}

impl AppState {
    /// Wire the repositories and services around a connection pool.
    pub fn new(db: PgPool, token_service: TokenService) -> Self {
        let user_repo = UserRepository::new(db.clone());
        let auth_service = AuthService::new(user_repo, token_service);
        let mood_service = MoodEntryService::new(MoodEntryRepository::new(db.clone()));
        Self {
            db,
            auth_service,
            mood_service,
        }
    }
}

/// Handler for GET /
/// Liveness probe, no auth
async fn root() -> &'static str {
    "Moodly API running..."
}

/// Creates and configures the application router
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes
        .route("/", get(root))
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/login", post(login_handler))
        // Mood routes, all behind the bearer-token gateway
        .route("/api/v1/moods", get(list_mood_entries))
        .route("/api/v1/moods", post(create_mood_entry))
        .route("/api/v1/moods/:id", put(update_mood_entry))
        .route("/api/v1/moods/:id", delete(delete_mood_entry))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "moodly_api=debug,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Moodly API - Starting...");

    // Configuration comes from the environment; missing secrets are fatal
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let token_ttl = std::env::var("JWT_EXPIRES_IN_SECONDS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(db_pool, TokenService::with_ttl(jwt_secret, token_ttl));
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Moodly API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    // Fail fast: an error escaping the serve loop tears the process down
    // and leaves the restart to external supervision
    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
