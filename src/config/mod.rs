use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Placeholder secrets used only outside production when nothing is configured.
const DEV_SIGNING_KEY: &str = "kinoteka-dev-signing-key";
const DEV_PASSWORD_SALT: &str = "kinoteka-dev-salt";

/// Upper bound for `SECURITY_TOKEN_TTL_HOURS` (one year).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    OutOfRange { name: &'static str, value: u64 },

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub sslmode: String,
    /// Full connection URL; takes precedence over the individual parts.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub signing_key: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub token_ttl_hours: u64,
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides();

        config.with_secrets()?.validated()
    }

    /// Rejects numeric settings that would break token or request handling.
    fn validated(self) -> Result<Self, ConfigError> {
        let ttl = self.security.token_ttl_hours;
        if ttl == 0 || ttl > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::OutOfRange {
                name: "SECURITY_TOKEN_TTL_HOURS",
                value: ttl,
            });
        }
        Ok(self)
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("PG_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("PG_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("PG_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("PG_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("PG_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("PG_SSLMODE") {
            self.database.sslmode = v;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_HOST") {
            self.api.host = v;
        }
        if let Ok(v) = env::var("API_PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_SIGNING_KEY") {
            self.security.signing_key = v;
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_SALT") {
            self.security.password_salt = v;
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_TTL_HOURS") {
            self.security.token_ttl_hours = v.parse().unwrap_or(self.security.token_ttl_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    /// Production refuses to start without real secrets; other environments
    /// fall back to development placeholders.
    fn with_secrets(mut self) -> Result<Self, ConfigError> {
        if self.security.signing_key.is_empty() {
            if self.environment == Environment::Production {
                return Err(ConfigError::Missing("SECURITY_SIGNING_KEY"));
            }
            tracing::warn!("SECURITY_SIGNING_KEY not set, using development signing key");
            self.security.signing_key = DEV_SIGNING_KEY.to_string();
        }
        if self.security.password_salt.is_empty() {
            if self.environment == Environment::Production {
                return Err(ConfigError::Missing("SECURITY_PASSWORD_SALT"));
            }
            tracing::warn!("SECURITY_PASSWORD_SALT not set, using development salt");
            self.security.password_salt = DEV_PASSWORD_SALT.to_string();
        }
        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: String::new(),
                name: "kinoteka".to_string(),
                sslmode: "disable".to_string(),
                url: None,
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                signing_key: String::new(),
                password_salt: String::new(),
                token_ttl_hours: 12,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
                ..Self::development().database
            },
            api: ApiConfig {
                request_timeout_secs: 15,
                ..Self::development().api
            },
            security: SecurityConfig {
                enable_cors: false,
                ..Self::development().security
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                sslmode: "require".to_string(),
                max_connections: 50,
                connect_timeout_secs: 5,
                ..Self::development().database
            },
            api: ApiConfig {
                request_timeout_secs: 10,
                enable_request_logging: false,
                ..Self::development().api
            },
            security: SecurityConfig {
                enable_cors: false,
                ..Self::development().security
            },
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, either taken verbatim from `DATABASE_URL` or assembled
    /// from the `PG_*` parts.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let base = format!("postgres://{}:{}", self.host, self.port);
        let mut url = url::Url::parse(&base).map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_username(&self.user)
            .map_err(|_| ConfigError::InvalidDatabaseUrl("cannot set user".to_string()))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| ConfigError::InvalidDatabaseUrl("cannot set password".to_string()))?;
        }
        url.set_path(&format!("/{}", self.name));
        url.query_pairs_mut().append_pair("sslmode", &self.sslmode);
        Ok(url.into())
    }
}

#[cfg(test)]
impl AppConfig {
    /// Development defaults with fixed secrets, independent of the process env.
    pub fn for_tests() -> Self {
        let mut config = Self::development();
        config.security.signing_key = "test-signing-key".to_string();
        config.security.password_salt = "test-salt".to_string();
        config
    }
}
