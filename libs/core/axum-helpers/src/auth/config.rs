use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// JWT configuration.
///
/// TTLs default to 15 minutes for access tokens and 7 days for refresh
/// tokens.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl FromEnv for JwtConfig {
    /// Reads from environment variables:
    /// - JWT_SECRET (required)
    /// - JWT_ACCESS_TTL_SECONDS (default 900)
    /// - JWT_REFRESH_TTL_SECONDS (default 604800)
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        let access_ttl_seconds = env_or_default("JWT_ACCESS_TTL_SECONDS", "900")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_ACCESS_TTL_SECONDS".to_string(),
                details: format!("{}", e),
            })?;

        let refresh_ttl_seconds = env_or_default("JWT_REFRESH_TTL_SECONDS", "604800")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_REFRESH_TTL_SECONDS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some("test-secret")),
                ("JWT_ACCESS_TTL_SECONDS", None),
                ("JWT_REFRESH_TTL_SECONDS", None),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, "test-secret");
                assert_eq!(config.access_ttl_seconds, 900);
                assert_eq!(config.refresh_ttl_seconds, 604800);
            },
        );
    }

    #[test]
    fn test_jwt_config_requires_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().is_err());
        });
    }
}
