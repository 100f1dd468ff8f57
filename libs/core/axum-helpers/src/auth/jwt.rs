use super::config::JwtConfig;
use super::store::AuthStore;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Token kind carried in the claims.
///
/// The refresh endpoint only accepts refresh tokens; everything else only
/// accepts access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user id)
    pub sub: String,
    pub username: String,
    pub is_admin: bool,
    pub kind: TokenKind,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// JWT id, used for revocation
    pub jti: String,
}

/// An access + refresh token pair issued at registration/login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Expected a {expected:?} token")]
    WrongKind { expected: TokenKind },

    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Token store error: {0}")]
    Store(String),
}

impl From<AuthError> for crate::errors::AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::Revoked | AuthError::WrongKind { .. } => {
                crate::errors::AppError::Unauthorized(err.to_string())
            }
            AuthError::Encoding(msg) | AuthError::Store(msg) => {
                crate::errors::AppError::InternalServerError(msg)
            }
        }
    }
}

/// Stateless HS256 JWT tokens combined with a revocation store.
///
/// Tokens stay valid until expiry unless their `jti` is blacklisted
/// (logout).
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    access_ttl: i64,
    refresh_ttl: i64,
    store: Arc<dyn AuthStore>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig, store: Arc<dyn AuthStore>) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            secret: config.secret.clone(),
            access_ttl: config.access_ttl_seconds,
            refresh_ttl: config.refresh_ttl_seconds,
            store,
        }
    }

    /// Create an access token for a user.
    pub fn create_access_token(
        &self,
        user_id: &str,
        username: &str,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        self.create_token(user_id, username, is_admin, TokenKind::Access, self.access_ttl)
    }

    /// Create a refresh token for a user.
    pub fn create_refresh_token(
        &self,
        user_id: &str,
        username: &str,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        self.create_token(
            user_id,
            username,
            is_admin,
            TokenKind::Refresh,
            self.refresh_ttl,
        )
    }

    /// Issue an access + refresh token pair.
    pub fn issue_pair(
        &self,
        user_id: &str,
        username: &str,
        is_admin: bool,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.create_access_token(user_id, username, is_admin)?,
            refresh: self.create_refresh_token(user_id, username, is_admin)?,
        })
    }

    fn create_token(
        &self,
        user_id: &str,
        username: &str,
        is_admin: bool,
        kind: TokenKind,
        ttl_seconds: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            is_admin,
            kind,
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Verify a token's signature and expiry, without touching the store.
    pub fn decode_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Fully verify a token: signature, expiry, expected kind, and the
    /// revocation store.
    pub async fn verify_token(
        &self,
        token: &str,
        expected_kind: TokenKind,
    ) -> Result<JwtClaims, AuthError> {
        let claims = self.decode_token(token)?;

        if claims.kind != expected_kind {
            return Err(AuthError::WrongKind {
                expected: expected_kind,
            });
        }

        let revoked = self
            .store
            .is_blacklisted(&claims.jti)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        if revoked {
            return Err(AuthError::Revoked);
        }

        Ok(claims)
    }

    /// Revoke a token by blacklisting its jti for its remaining lifetime.
    pub async fn revoke_token(&self, claims: &JwtClaims) -> Result<(), AuthError> {
        let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;

        self.store
            .blacklist(&claims.jti, remaining)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::InMemoryAuthStore;

    fn test_auth() -> JwtAuth {
        let config = JwtConfig {
            secret: "test-secret".to_string(),
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 604800,
        };
        JwtAuth::new(&config, Arc::new(InMemoryAuthStore::new()))
    }

    #[tokio::test]
    async fn test_issue_and_verify_pair() {
        let auth = test_auth();
        let pair = auth.issue_pair("user-1", "alice", false).unwrap();

        let claims = auth
            .verify_token(&pair.access, TokenKind::Access)
            .await
            .unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_admin);

        let claims = auth
            .verify_token(&pair.refresh, TokenKind::Refresh)
            .await
            .unwrap();
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn test_kind_mismatch_rejected() {
        let auth = test_auth();
        let pair = auth.issue_pair("user-1", "alice", false).unwrap();

        let result = auth.verify_token(&pair.refresh, TokenKind::Access).await;
        assert!(matches!(result, Err(AuthError::WrongKind { .. })));
    }

    #[tokio::test]
    async fn test_revoked_token_rejected() {
        let auth = test_auth();
        let token = auth.create_access_token("user-1", "alice", true).unwrap();

        let claims = auth.verify_token(&token, TokenKind::Access).await.unwrap();
        auth.revoke_token(&claims).await.unwrap();

        let result = auth.verify_token(&token, TokenKind::Access).await;
        assert!(matches!(result, Err(AuthError::Revoked)));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let auth = test_auth();
        let result = auth.verify_token("not-a-jwt", TokenKind::Access).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
