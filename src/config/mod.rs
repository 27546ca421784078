//! Application configuration module
//!
//! Configuration is read from environment variables with the `MAGAZINE`
//! prefix; nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use magazine_subscriptions::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod portone;
mod server;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use portone::PortOneSettings;
pub use server::{Environment, ServerConfig};
pub use storage::{PostgrestSettings, StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Only read when `storage.backend = postgres`
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Only read when `storage.backend = postgrest`
    #[serde(default)]
    pub postgrest: PostgrestSettings,

    #[serde(default)]
    pub portone: PortOneSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `MAGAZINE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MAGAZINE__STORAGE__BACKEND=postgrest` -> `storage.backend`
    /// - `MAGAZINE__PORTONE__API_SECRET=...` -> `portone.api_secret`
    ///
    /// A `.env` file is loaded first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MAGAZINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the selected storage backend actually uses.
    ///
    /// A missing PortOne secret is not an error here; gateway-backed
    /// requests report it per call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match self.storage.backend {
            StorageBackend::Postgres => self.database.validate()?,
            StorageBackend::Postgrest => self.postgrest.validate()?,
            StorageBackend::Memory => {}
        }
        self.portone.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MAGAZINE__DATABASE__URL",
        "MAGAZINE__STORAGE__BACKEND",
        "MAGAZINE__POSTGREST__URL",
        "MAGAZINE__POSTGREST__ACCESS_KEY",
        "MAGAZINE__PORTONE__API_SECRET",
        "MAGAZINE__PORTONE__CURRENCY",
        "MAGAZINE__SERVER__PORT",
        "MAGAZINE__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("MAGAZINE__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("MAGAZINE__PORTONE__API_SECRET", "portone-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert!(config.portone.has_secret());
        assert_eq!(config.portone.currency, "KRW");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_custom_server_port_and_environment() {
        let config = load_with(&[
            ("MAGAZINE__SERVER__PORT", "3000"),
            ("MAGAZINE__SERVER__ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }

    #[test]
    fn test_postgrest_backend_skips_database_validation() {
        let mut config = load_with(&[
            ("MAGAZINE__STORAGE__BACKEND", "postgrest"),
            ("MAGAZINE__POSTGREST__URL", "https://xyz.supabase.co"),
            ("MAGAZINE__POSTGREST__ACCESS_KEY", "service-key"),
        ])
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgrest);
        config.database.url.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgrest_backend_requires_its_settings() {
        let config = load_with(&[("MAGAZINE__STORAGE__BACKEND", "postgrest")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MAGAZINE__POSTGREST__URL"))
        );
    }

    #[test]
    fn test_memory_backend_needs_no_storage_settings() {
        let config = AppConfig {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_portone_secret_still_validates() {
        let mut config = load_with(&[]).unwrap();
        config.portone.api_secret = None;
        assert!(config.validate().is_ok());
    }
}
