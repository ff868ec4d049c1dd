//! Source adapters.
//!
//! A [`SourceAdapter`] chains gateway fetch, field extraction and
//! normalization for one [`EndpointConfig`]. The per-source modules only hold
//! configuration; the pipeline itself is shared.

pub mod central_bank;
pub mod dolar_widget;
pub mod social_profile;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::config::EndpointConfig;
use crate::gateway::SourceGateway;
use crate::normalize::normalize;
use crate::{Rate, RateSource, SourceError, SourceId};

/// Fetch → extract → normalize for one endpoint.
#[derive(Clone)]
pub struct SourceAdapter {
    endpoint: EndpointConfig,
    gateway: Arc<SourceGateway>,
}

impl SourceAdapter {
    pub fn new(endpoint: EndpointConfig, gateway: Arc<SourceGateway>) -> Self {
        Self { endpoint, gateway }
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    async fn resolve(&self) -> Result<Rate, SourceError> {
        let content = self.gateway.fetch(&self.endpoint.url).await?;
        let candidate = self.endpoint.extractor.extract(&content)?;
        let rate = normalize(candidate)?;

        if rate.is_sentinel() {
            return Err(SourceError::not_found(format!(
                "{} published an empty rate",
                self.endpoint.url
            )));
        }

        debug!(
            source = %self.endpoint.source,
            strategy = %self.endpoint.label,
            rate = %rate,
            "resolved rate"
        );
        Ok(rate)
    }
}

impl RateSource for SourceAdapter {
    fn id(&self) -> SourceId {
        self.endpoint.source
    }

    fn label(&self) -> &str {
        &self.endpoint.label
    }

    fn fetch_rate<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Rate, SourceError>> + Send + 'a>> {
        Box::pin(self.resolve())
    }
}
