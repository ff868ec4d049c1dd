//! Source gateway: one best-effort fetch per call.
//!
//! Transport failures never cross this boundary as anything other than
//! [`SourceErrorKind::Unavailable`](crate::SourceErrorKind::Unavailable). No
//! retries and no caching happen here.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::SourceError;

/// Payload of a successful fetch. Lives only as long as one adapter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    url: String,
    body: String,
}

impl RawContent {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Fetches raw content with a browser-like identification header.
#[derive(Clone)]
pub struct SourceGateway {
    http_client: Arc<dyn HttpClient>,
    config: HttpConfig,
}

impl SourceGateway {
    pub fn new(http_client: Arc<dyn HttpClient>, config: HttpConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Gateway over the production reqwest transport.
    pub fn with_reqwest(config: HttpConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub async fn fetch(&self, url: &str) -> Result<RawContent, SourceError> {
        let request = HttpRequest::get(url)
            .with_header("user-agent", self.config.user_agent.as_str())
            .with_header("accept", "text/html,application/javascript,*/*;q=0.8")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(url, timed_out = error.timed_out(), error = %error, "fetch failed");
            SourceError::unavailable(format!("transport error for '{url}': {}", error.message()))
        })?;

        if !response.is_success() {
            warn!(url, status = response.status, "fetch returned non-success status");
            return Err(SourceError::unavailable(format!(
                "'{url}' returned status {}",
                response.status
            )));
        }

        debug!(url, bytes = response.body.len(), "fetched source content");
        Ok(RawContent::new(url, response.body))
    }
}
