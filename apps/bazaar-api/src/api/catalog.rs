use axum::{Router, middleware};
use axum_helpers::{jwt_auth_middleware, require_admin};
use domain_catalog::{CatalogCache, CatalogService, PgCatalogRepository, handlers};

use crate::state::AppState;

/// Catalog routes: open reads, admin-only catalog writes, and
/// authenticated comment writes.
pub fn router(state: &AppState) -> Router {
    let repository = PgCatalogRepository::new(state.db.clone());
    let cache = CatalogCache::new(state.redis.clone());
    let service = CatalogService::new(repository).with_cache(cache);

    let admin_writes = handlers::admin_router(service.clone())
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ));

    let comment_writes = handlers::comment_write_router(service.clone()).route_layer(
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware),
    );

    handlers::read_router(service)
        .merge(admin_writes)
        .merge(comment_writes)
}
