//! Configuration structs

mod app_config;

pub use app_config::{
    AllianceDefaults, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, RateLimitConfig, RecognitionConfig, ServerConfig, StoreBackend,
};
