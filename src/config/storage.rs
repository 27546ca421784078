//! Storage backend selection and PostgREST settings

use serde::Deserialize;

use super::error::ValidationError;

/// Which persistence adapters to wire.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Direct connection through sqlx (`database` section)
    #[default]
    Postgres,
    /// Hosted PostgREST endpoint (`postgrest` section)
    Postgrest,
    /// Process memory; development only
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// PostgREST endpoint settings
#[derive(Clone, Default, Deserialize)]
pub struct PostgrestSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub access_key: String,
}

impl PostgrestSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("MAGAZINE__POSTGREST__URL"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidPostgrestUrl);
        }
        if self.access_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MAGAZINE__POSTGREST__ACCESS_KEY",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PostgrestSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestSettings")
            .field("url", &self.url)
            .field("access_key", &"[REDACTED]")
            .finish()
    }
}
