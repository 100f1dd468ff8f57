use super::jwt::{JwtAuth, JwtClaims, TokenKind};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract a bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// JWT authentication middleware.
///
/// Verifies the bearer access token (signature, expiry, revocation) and
/// inserts [`JwtClaims`] into request extensions on success.
///
/// # Example
/// ```ignore
/// let protected = Router::new()
///     .route("/orders", post(create_order))
///     .route_layer(axum::middleware::from_fn_with_state(
///         jwt_auth.clone(),
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = auth.verify_token(&token, TokenKind::Access).await?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin-only middleware.
///
/// Must run after [`jwt_auth_middleware`]; rejects callers whose claims
/// do not carry `is_admin`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let is_admin = request
        .extensions()
        .get::<JwtClaims>()
        .map(|claims| claims.is_admin);

    match is_admin {
        Some(true) => Ok(next.run(request).await),
        Some(false) => Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        )),
        None => Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        )),
    }
}
