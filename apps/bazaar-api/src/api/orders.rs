use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_orders::{OrdersService, PgOrdersRepository, handlers};

use crate::state::AppState;

/// Order routes: open reads, authenticated writes.
pub fn router(state: &AppState) -> Router {
    let repository = PgOrdersRepository::new(state.db.clone());
    let service = OrdersService::new(repository);

    let writes = handlers::write_router(service.clone()).route_layer(
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware),
    );

    handlers::read_router(service).merge(writes)
}
