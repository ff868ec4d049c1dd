//! Configuration records.
//!
//! Every URL, username and pattern lives here instead of inline in the
//! adapters, so tests can point the pipeline at fixture content.

use crate::adapters::{central_bank, dolar_widget, social_profile};
use crate::extract::Extractor;
use crate::{ConfigError, SourceId};

/// Browser-like identification; at least one source rejects library agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Transport settings shared by every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HttpConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }
}

/// Where one retrieval strategy fetches from and how it extracts the rate.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub source: SourceId,
    pub label: String,
    pub url: String,
    pub extractor: Extractor,
}

impl EndpointConfig {
    pub fn new(
        source: SourceId,
        label: impl Into<String>,
        url: impl Into<String>,
        extractor: impl Into<Extractor>,
    ) -> Self {
        Self {
            source,
            label: label.into(),
            url: url.into(),
            extractor: extractor.into(),
        }
    }
}

/// Full source set for one report run.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub central_bank: EndpointConfig,
    /// Tried only when the central bank strategy fails.
    pub central_bank_fallback: Option<EndpointConfig>,
    pub aggregator_widget: EndpointConfig,
    pub social_profile: EndpointConfig,
    pub http: HttpConfig,
}

impl SourcesConfig {
    /// The published endpoints.
    pub fn standard() -> Result<Self, ConfigError> {
        Ok(Self {
            central_bank: central_bank::endpoint()?,
            central_bank_fallback: Some(central_bank::fallback_endpoint()?),
            aggregator_widget: dolar_widget::endpoint()?,
            social_profile: social_profile::ProfileConfig::enparalelovzla().endpoint()?,
            http: HttpConfig::default(),
        })
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.central_bank_fallback = None;
        self
    }

    /// Primary endpoints in report order.
    pub fn endpoints(&self) -> [&EndpointConfig; 3] {
        [
            &self.central_bank,
            &self.aggregator_widget,
            &self.social_profile,
        ]
    }

    /// The fallback configured for `source`, if any.
    pub fn fallback_for(&self, source: SourceId) -> Option<&EndpointConfig> {
        match source {
            SourceId::CentralBank => self.central_bank_fallback.as_ref(),
            SourceId::AggregatorWidget | SourceId::SocialProfile => None,
        }
    }
}
