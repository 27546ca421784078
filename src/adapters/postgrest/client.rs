//! Minimal PostgREST client.
//!
//! Talks to `<url>/rest/v1/<table>` with the access key sent both as
//! `apikey` and as a bearer token.

use reqwest::{Method, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Connection settings for a PostgREST endpoint.
#[derive(Clone)]
pub struct PostgrestConfig {
    url: String,
    access_key: SecretString,
}

impl PostgrestConfig {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_key: SecretString::new(access_key.into()),
        }
    }
}

impl std::fmt::Debug for PostgrestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestConfig")
            .field("url", &self.url)
            .field("access_key", &"[REDACTED]")
            .finish()
    }
}

/// Shared HTTP client for PostgREST-backed adapters.
#[derive(Clone)]
pub struct PostgrestClient {
    config: PostgrestConfig,
    http_client: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.config.url).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("invalid PostgREST URL: {}", e),
            )
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                DomainError::new(ErrorCode::InternalError, "PostgREST URL cannot carry a path")
            })?;
            path.pop_if_empty().extend(["rest", "v1", table]);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let key = self.config.access_key.expose_secret();
        self.http_client
            .request(method, url)
            .header("apikey", key.as_str())
            .bearer_auth(key)
    }

    /// Insert one row. The row must carry every non-defaulted column.
    pub async fn insert<T>(&self, table: &str, row: &T) -> Result<(), DomainError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let url = self.table_url(table)?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| DomainError::database(format!("insert into {} failed: {}", table, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                table,
                status = status.as_u16(),
                body = %body,
                "PostgREST insert rejected"
            );
            return Err(DomainError::database(format!(
                "insert into {} rejected with status {}",
                table, status
            ))
            .with_detail("body", body));
        }
        Ok(())
    }

    /// Select rows matching PostgREST query parameters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, DomainError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| DomainError::database(format!("select from {} failed: {}", table, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                table,
                status = status.as_u16(),
                body = %body,
                "PostgREST select rejected"
            );
            return Err(DomainError::database(format!(
                "select from {} rejected with status {}",
                table, status
            ))
            .with_detail("body", body));
        }

        response.json().await.map_err(|e| {
            DomainError::database(format!("unreadable rows from {}: {}", table, e))
        })
    }
}
