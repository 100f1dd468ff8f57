//! API routes module

pub mod auth;
pub mod catalog;
pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Creates the API routes without the `/api` prefix.
///
/// The `/api` prefix is added by the `create_router` helper. All
/// sub-routers have their state applied already; auth layers are
/// applied per resource group here.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .merge(catalog::router(state))
        .merge(orders::router(state))
}
