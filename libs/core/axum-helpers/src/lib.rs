//! # Axum Helpers
//!
//! Shared utilities for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT token pairs with a pluggable revocation store
//! - **[`errors`]**: Structured error responses
//! - **[`extractors`]**: Custom extractors (validated JSON)
//! - **[`server`]**: Router composition, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{
    AuthError, AuthStore, InMemoryAuthStore, JwtAuth, JwtClaims, JwtConfig, RedisAuthStore,
    TokenKind, TokenPair, jwt_auth_middleware, require_admin,
};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export server helpers
pub use server::{create_app, create_router, shutdown_signal};
