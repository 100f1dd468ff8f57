use axum::Router;
use domain_users::{AuthState, PgUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(AuthState {
        service,
        jwt_auth: state.jwt_auth.clone(),
    })
}
