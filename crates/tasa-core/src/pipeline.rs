//! One report run: every configured source exactly once, in fetch order.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::adapters::SourceAdapter;
use crate::config::{EndpointConfig, SourcesConfig};
use crate::fallback::FallbackChain;
use crate::gateway::SourceGateway;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::report::RateReport;
use crate::{RateSource, SourceId};

/// Ordered set of fallback chains that produces a [`RateReport`].
#[derive(Clone)]
pub struct RatePipeline {
    chains: Vec<FallbackChain>,
}

impl RatePipeline {
    pub fn new(chains: Vec<FallbackChain>) -> Self {
        Self { chains }
    }

    /// Wires adapters for every endpoint in `config` over one shared gateway.
    pub fn from_config(config: &SourcesConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let gateway = Arc::new(SourceGateway::new(http_client, config.http.clone()));
        let adapter = |endpoint: &EndpointConfig| -> Arc<dyn RateSource> {
            Arc::new(SourceAdapter::new(endpoint.clone(), Arc::clone(&gateway)))
        };

        let chains = config
            .endpoints()
            .into_iter()
            .map(|endpoint| match config.fallback_for(endpoint.source) {
                Some(fallback) => FallbackChain::with_fallback(adapter(endpoint), adapter(fallback)),
                None => FallbackChain::single(adapter(endpoint)),
            })
            .collect();

        Self::new(chains)
    }

    pub fn with_reqwest(config: &SourcesConfig) -> Self {
        Self::from_config(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn sources(&self) -> Vec<SourceId> {
        self.chains.iter().map(FallbackChain::id).collect()
    }

    /// Resolves each chain sequentially. A failing source never aborts the run.
    pub async fn build_report(&self) -> RateReport {
        let started = Instant::now();
        let mut entries = Vec::with_capacity(self.chains.len());

        for chain in &self.chains {
            entries.push(chain.resolve().await);
        }

        let report = RateReport::new(entries);
        info!(
            sources = report.entries().len(),
            unavailable = report.unavailable().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rate report built"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::FixtureHttpClient;

    #[test]
    fn standard_pipeline_follows_fetch_order() {
        let config = SourcesConfig::standard().expect("literals are valid");
        let pipeline = RatePipeline::from_config(&config, Arc::new(FixtureHttpClient::new()));

        assert_eq!(pipeline.sources(), SourceId::ALL.to_vec());
    }

    #[tokio::test]
    async fn unreachable_sources_still_produce_a_full_report() {
        let config = SourcesConfig::standard().expect("literals are valid");
        let pipeline = RatePipeline::from_config(&config, Arc::new(FixtureHttpClient::new()));

        let report = pipeline.build_report().await;

        assert_eq!(report.entries().len(), 3);
        assert_eq!(report.unavailable(), SourceId::ALL.to_vec());
        assert_eq!(report.diagnostics().count(), 4);
    }
}
