//! PortOne gateway configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::portone::{PortOneConfig, DEFAULT_API_BASE_URL};

/// PortOne V2 settings.
///
/// The secret may be absent at boot; requests that need the gateway then
/// fail with a configuration error instead.
#[derive(Clone, Deserialize)]
pub struct PortOneSettings {
    /// V2 API secret
    pub api_secret: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Store id forwarded on schedule lookups
    pub store_id: Option<String>,
}

impl PortOneSettings {
    pub fn has_secret(&self) -> bool {
        self.api_secret
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Adapter configuration with the secret moved into a `SecretString`.
    pub fn to_adapter_config(&self) -> PortOneConfig {
        PortOneConfig::unconfigured()
            .with_secret(self.api_secret.clone())
            .with_base_url(self.api_base_url.clone())
            .with_currency(self.currency.clone())
            .with_store_id(self.store_id.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl std::fmt::Debug for PortOneSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortOneSettings")
            .field("api_secret", &self.has_secret().then_some("[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("currency", &self.currency)
            .field("store_id", &self.store_id)
            .finish()
    }
}

impl Default for PortOneSettings {
    fn default() -> Self {
        Self {
            api_secret: None,
            api_base_url: default_api_base_url(),
            currency: default_currency(),
            store_id: None,
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_currency() -> String {
    "KRW".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PortOneSettings {
        PortOneSettings {
            api_secret: Some("secret".to_string()),
            api_base_url: default_api_base_url(),
            currency: default_currency(),
            store_id: None,
        }
    }

    #[test]
    fn test_missing_secret_is_not_a_validation_error() {
        let config = PortOneSettings {
            api_secret: None,
            ..settings()
        };
        assert!(config.validate().is_ok());
        assert!(!config.has_secret());
        assert!(!config.to_adapter_config().is_configured());
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let config = PortOneSettings {
            api_secret: Some("   ".to_string()),
            ..settings()
        };
        assert!(!config.has_secret());
    }

    #[test]
    fn test_invalid_currency() {
        let config = PortOneSettings {
            currency: "won".to_string(),
            ..settings()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCurrency));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = PortOneSettings {
            api_base_url: "api.portone.io".to_string(),
            ..settings()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidGatewayUrl));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("\"secret\""));
        assert!(rendered.contains("REDACTED"));
    }
}
