use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the built frontend, served for every non-API path
    pub public_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub session_ttl_days: i64,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific vars
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        config.security.jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        if let Some(v) = lookup("SESSION_TTL_DAYS") {
            config.security.session_ttl_days = parse_ttl_days("SESSION_TTL_DAYS", &v)?;
        }

        config.database.url = lookup("DATABASE_URL");
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = v
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "DATABASE_MAX_CONNECTIONS", value: v })?;
        }

        if let Some(v) = lookup("CATALOG_PORT").or_else(|| lookup("PORT")) {
            config.server.port = v
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value: v })?;
        }
        if let Some(v) = lookup("PUBLIC_DIR") {
            config.server.public_dir = v;
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                public_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                session_ttl_days: 7,
                secure_cookies: false,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
            },
            ..Self::development()
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                session_ttl_days: 7,
                secure_cookies: true,
            },
            ..Self::development()
        }
    }
}

/// Longest session lifetime accepted from the environment
pub const MAX_SESSION_TTL_DAYS: i64 = 365;

fn parse_ttl_days(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(n) if (1..=MAX_SESSION_TTL_DAYS).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid { name, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.security.session_ttl_days, 7);
        assert!(!config.security.secure_cookies);
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_production_uses_secure_cookies() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert!(config.security.secure_cookies);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("SESSION_TTL_DAYS", "3"),
            ("DATABASE_URL", "postgres://localhost/casa"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.session_ttl_days, 3);
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/casa"));
    }

    #[test]
    fn test_invalid_ttl_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("SESSION_TTL_DAYS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SESSION_TTL_DAYS", .. }));
    }

    #[test]
    fn test_ttl_upper_bound() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("SESSION_TTL_DAYS", "365"),
        ]))
        .unwrap();
        assert_eq!(config.security.session_ttl_days, MAX_SESSION_TTL_DAYS);

        for value in ["366", "100000000", "100000000000000", "-7"] {
            let err = AppConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("SESSION_TTL_DAYS", value),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: "SESSION_TTL_DAYS", .. }), "value {}", value);
        }
    }
}
