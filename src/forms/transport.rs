use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::{
    config::ApiConfig,
    error::{Error, Result},
};

/// Delivers a form payload to the remote API.
///
/// Implementations return the HTTP status code of the response. Only
/// transport-level failures (connection refused, timeout, ...) are errors.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<u16>;
}

/// reqwest-backed transport rooted at the configured API base URL.
///
/// The base URL may carry a path prefix (`http://host/clinic`); endpoints
/// resolve beneath it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Internal(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Internal(format!(
                "Invalid API base URL '{}': not a hierarchical URL",
                config.base_url
            )));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path such as `/api/appointment` under the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Internal(format!("Invalid endpoint '{}': {}", path, e)))
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<u16> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
