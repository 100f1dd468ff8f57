//! Bazaar API - e-commerce REST server

use axum_helpers::server::{create_app, create_router};
use axum_helpers::{JwtAuth, RedisAuthStore};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Initialize database connections concurrently
    let postgres_future = async {
        database::postgres::connect_from_config_with_retry(config.database.clone(), None)
            .await
            .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))
    };

    let redis_future = async {
        database::redis::connect_from_config_with_retry(&config.redis, None)
            .await
            .map_err(|e| eyre::eyre!("Redis connection failed: {}", e))
    };

    let (db, redis) = tokio::try_join!(postgres_future, redis_future)?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "bazaar_api").await?;

    // JWT auth with a redis-backed revocation store
    let jwt_auth = JwtAuth::new(&config.jwt, Arc::new(RedisAuthStore::new(redis.clone())));

    let state = AppState {
        config: config.clone(),
        db,
        redis,
        jwt_auth,
    };

    // Build the router: API routes under /api, swagger at /docs,
    // health endpoints, and the media file tree.
    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(api::health::router(state.clone()))
        .nest_service(
            &config.media.url_prefix,
            ServeDir::new(&config.media.root),
        );

    info!("Starting Bazaar API on {}", config.server.address());

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Bazaar API shutdown complete");
    Ok(())
}
