pub mod config;
pub mod jwt;
pub mod middleware;
pub mod store;

pub use config::JwtConfig;
pub use jwt::{AuthError, JwtAuth, JwtClaims, TokenKind, TokenPair};
pub use middleware::{jwt_auth_middleware, require_admin};
pub use store::{AuthStore, InMemoryAuthStore, RedisAuthStore};
