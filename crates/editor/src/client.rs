//! Config store client.

use async_trait::async_trait;
use domain::models::CreateSiteConfigRequest;
use reqwest::{Client, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::EditorConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status. `error` and `message` are
    /// the fields of its JSON error body, when it sent one.
    #[error("Store returned {status}")]
    Status {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },

    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Human-readable text supplied by the store, if any.
    pub fn store_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, error, .. } => {
                message.as_deref().or(error.as_deref())
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

/// Operations the editor needs from the config store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Stored record of `client_id`.
    async fn load(&self, client_id: &str) -> Result<Value, ClientError>;

    /// Writes `record` for `client_id` and returns the stored record.
    async fn save(&self, client_id: &str, record: &Value) -> Result<Value, ClientError>;

    /// Creates a new client and returns the stored record, including its `id`.
    async fn create(&self, request: &CreateSiteConfigRequest) -> Result<Value, ClientError>;
}

/// [`ConfigStore`] over the store's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpConfigStore {
    client: Client,
    config: EditorConfig,
}

impl HttpConfigStore {
    pub fn new(config: EditorConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_root(), path)
    }

    /// URL of one client's record. The id is percent-encoded as a single path
    /// segment.
    fn config_url(&self, client_id: &str) -> String {
        self.url(&format!("/api/config/{}", urlencoding::encode(client_id)))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.config.timeout_secs)
        } else {
            ClientError::Http(e)
        }
    }
}

/// Reads a JSON body, turning non-2xx answers into [`ClientError::Status`].
async fn read_json(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        return Err(ClientError::Status {
            status: status.as_u16(),
            error: field("error"),
            message: field("message"),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn load(&self, client_id: &str) -> Result<Value, ClientError> {
        // Cache buster, the store may sit behind a caching proxy.
        let url = format!(
            "{}?_t={}",
            self.config_url(client_id),
            chrono::Utc::now().timestamp_millis()
        );
        debug!(url = %url, "Loading config");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        read_json(response).await
    }

    async fn save(&self, client_id: &str, record: &Value) -> Result<Value, ClientError> {
        let url = self.config_url(client_id);
        debug!(url = %url, "Saving config");

        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        read_json(response).await
    }

    async fn create(&self, request: &CreateSiteConfigRequest) -> Result<Value, ClientError> {
        let url = self.url("/api/config");
        debug!(url = %url, template_type = %request.template_type, "Creating client");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_message_prefers_message() {
        let err = ClientError::Status {
            status: 400,
            error: Some("validation_error".into()),
            message: Some("Name must be 1-200 characters".into()),
        };
        assert_eq!(err.store_message(), Some("Name must be 1-200 characters"));
    }

    #[test]
    fn test_store_message_falls_back_to_error() {
        let err = ClientError::Status {
            status: 500,
            error: Some("Failed to update website configuration".into()),
            message: None,
        };
        assert_eq!(
            err.store_message(),
            Some("Failed to update website configuration")
        );
        assert!(ClientError::Timeout(30).store_message().is_none());
    }

    #[test]
    fn test_is_not_found() {
        let err = ClientError::Status {
            status: 404,
            error: None,
            message: None,
        };
        assert!(err.is_not_found());
        assert!(!ClientError::InvalidResponse("x".into()).is_not_found());
    }

    #[test]
    fn test_config_url_encodes_client_id() {
        let store = HttpConfigStore::new(EditorConfig::new("http://store:8080")).unwrap();
        assert_eq!(
            store.config_url("acme-01"),
            "http://store:8080/api/config/acme-01"
        );
        assert_eq!(
            store.config_url("a/b?c#d"),
            "http://store:8080/api/config/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_url_joins_base() {
        let store = HttpConfigStore::new(EditorConfig::new("http://store:8080/")).unwrap();
        assert_eq!(store.url("/api/config"), "http://store:8080/api/config");
    }
}
