//! Application state management.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;
use database::redis::ConnectionManager;

/// Shared application state.
///
/// Cloned per handler; every member is cheap to clone (pools and Arcs).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Redis connection manager (cache + token revocation)
    pub redis: ConnectionManager,
    /// JWT authentication
    pub jwt_auth: JwtAuth,
}
