//! HTTP handlers for authentication endpoints.

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    AppError, JwtAuth, JwtClaims, TokenKind, TokenPair, ValidatedJson, jwt_auth_middleware,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::models::{LoginRequest, RegisterRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, logout, obtain_token_pair, refresh_token, legacy_token),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        RefreshRequest,
        TokenPair,
        AccessTokenResponse,
        LegacyTokenResponse,
        MessageResponse,
        UserResponse,
    )),
    tags(
        (name = "Auth", description = "Registration, login, and token management")
    )
)]
pub struct ApiDoc;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

/// Create the auth router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    let protected = Router::new()
        .route("/logout", post(logout::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .route("/token", post(obtain_token_pair::<R>))
        .route("/token/refresh", post(refresh_token::<R>))
        .route("/token/legacy", post(legacy_token::<R>))
        .merge(protected)
        .with_state(state)
}

/// Request body for token refresh
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response carrying a fresh access token
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Legacy single-token response
#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyTokenResponse {
    pub token: String,
}

/// Plain message response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, token pair issued", body = TokenPair),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username already exists")
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.service.register(input).await?;

    let pair = state
        .jwt_auth
        .issue_pair(&user.id.to_string(), &user.username, user.is_admin)?;

    Ok((StatusCode::CREATED, Json(pair)))
}

/// Login with username/password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let pair = state
        .jwt_auth
        .issue_pair(&user.id.to_string(), &user.username, user.is_admin)?;

    Ok(Json(pair))
}

/// Obtain a token pair (coexisting endpoint with the same semantics as login)
#[utoipa::path(
    post,
    path = "/token",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn obtain_token_pair<R: UserRepository>(
    state: State<AuthState<R>>,
    input: ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    login(state, input).await
}

/// Exchange a refresh token for a fresh access token
#[utoipa::path(
    post,
    path = "/token/refresh",
    tag = "Auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Fresh access token", body = AccessTokenResponse),
        (status = 401, description = "Invalid or revoked refresh token")
    )
)]
async fn refresh_token<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Json(input): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let claims = state
        .jwt_auth
        .verify_token(&input.refresh, TokenKind::Refresh)
        .await?;

    let access =
        state
            .jwt_auth
            .create_access_token(&claims.sub, &claims.username, claims.is_admin)?;

    Ok(Json(AccessTokenResponse { access }))
}

/// Legacy token endpoint returning a single token
#[utoipa::path(
    post,
    path = "/token/legacy",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LegacyTokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn legacy_token<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<LegacyTokenResponse>, AppError> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let token = state
        .jwt_auth
        .create_access_token(&user.id.to_string(), &user.username, user.is_admin)?;

    Ok(Json(LegacyTokenResponse { token }))
}

/// Invalidate the caller's access token
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
async fn logout<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<MessageResponse>, AppError> {
    state.jwt_auth.revoke_token(&claims).await?;

    tracing::info!(user_id = %claims.sub, "User logged out");
    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}
