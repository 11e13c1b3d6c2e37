// Authentication module
// User registration, login, and the bearer-token gateway protecting mood routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, register_handler};
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
