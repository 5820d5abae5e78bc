//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when one
//! is present).

use roster_core::{DEFAULT_ALLIANCE_NAME, DEFAULT_LOGO_URL};
use secrecy::SecretString;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreBackend,
    /// Present whenever `store` is Postgres
    pub database: Option<DatabaseConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub recognition: RecognitionConfig,
    pub alliance: AllianceDefaults,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidValue("APP_ENV", s.to_string())),
        }
    }
}

/// Which record store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue("STORE_BACKEND", s.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Screenshot name recognition; disabled without an API key
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl RecognitionConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_RECOGNITION_MODEL.to_string(),
            base_url: DEFAULT_RECOGNITION_BASE_URL.to_string(),
            timeout_secs: DEFAULT_RECOGNITION_TIMEOUT_SECS,
        }
    }
}

/// Branding used when no alliance config has been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceDefaults {
    pub name: String,
    pub logo: String,
}

impl Default for AllianceDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_ALLIANCE_NAME.to_string(),
            logo: DEFAULT_LOGO_URL.to_string(),
        }
    }
}

const DEFAULT_APP_NAME: &str = "roster-api";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_BURST: u32 = 50;
const DEFAULT_RECOGNITION_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_RECOGNITION_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_RECOGNITION_TIMEOUT_SECS: u64 = 30;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let store: StoreBackend = vars.parse_or("STORE_BACKEND", StoreBackend::default())?;
        let database = match store {
            StoreBackend::Postgres => Some(DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?,
            }),
            StoreBackend::Memory => None,
        };

        let defaults = AllianceDefaults::default();

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
                env: vars.parse_or("APP_ENV", Environment::default())?,
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: vars.required("API_PORT").and_then(|raw| {
                    raw.parse()
                        .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))
                })?,
            },
            store,
            database,
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", DEFAULT_REQUESTS_PER_SECOND)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", DEFAULT_BURST)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            recognition: RecognitionConfig {
                api_key: vars.get("RECOGNITION_API_KEY").map(SecretString::from),
                model: vars
                    .get("RECOGNITION_MODEL")
                    .unwrap_or_else(|| DEFAULT_RECOGNITION_MODEL.to_string()),
                base_url: vars
                    .get("RECOGNITION_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_RECOGNITION_BASE_URL.to_string()),
                timeout_secs: vars
                    .parse_or("RECOGNITION_TIMEOUT_SECS", DEFAULT_RECOGNITION_TIMEOUT_SECS)?,
            },
            alliance: AllianceDefaults {
                name: vars.get("ALLIANCE_NAME").unwrap_or(defaults.name),
                logo: vars.get("ALLIANCE_LOGO").unwrap_or(defaults.logo),
            },
        })
    }
}

/// Environment lookup that treats blank values as unset
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = load(&[("API_PORT", "3000"), ("STORE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.api.address(), "127.0.0.1:3000");
        assert_eq!(config.app.env, Environment::Development);
        assert!(!config.recognition.is_enabled());
        assert_eq!(config.recognition.model, "gemini-3-flash-preview");
        assert_eq!(config.alliance, AllianceDefaults::default());
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        let err = load(&[("API_PORT", "3000")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));

        let config = load(&[
            ("API_PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/roster"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, DEFAULT_MIN_CONNECTIONS);
    }

    #[test]
    fn test_missing_and_invalid_port() {
        let err = load(&[("STORE_BACKEND", "memory")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("API_PORT")));

        let err = load(&[("STORE_BACKEND", "memory"), ("API_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_PORT", "3000"),
            ("STORE_BACKEND", "memory"),
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("RECOGNITION_API_KEY", "secret"),
            ("ALLIANCE_NAME", "Night Watch"),
        ])
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(
            config.recognition.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("secret".to_string())
        );
        assert_eq!(config.alliance.name, "Night Watch");
        assert_eq!(config.alliance.logo, DEFAULT_LOGO_URL);
    }
}
