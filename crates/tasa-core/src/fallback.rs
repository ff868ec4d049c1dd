//! Fallback orchestration and the per-source failure boundary.
//!
//! A [`FallbackChain`] owns the strategies for one report slot: the primary
//! adapter and at most one fallback. Whatever happens below it, resolving a
//! chain yields a [`ResolvedRate`]; failures end up as the sentinel rate plus
//! [`Diagnostic`]s, never as an error.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::{Rate, RateSource, SourceError, SourceId};

/// Which strategy produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Primary,
    Fallback,
}

/// Operator-facing notice about one failed strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub source: SourceId,
    pub strategy: String,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    fn new(source: SourceId, strategy: &str, error: &SourceError) -> Self {
        Self {
            source,
            strategy: strategy.to_owned(),
            code: error.code(),
            message: error.message().to_owned(),
        }
    }
}

/// Final outcome for one report slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRate {
    pub source: SourceId,
    /// [`Rate::SENTINEL`] when every strategy failed.
    pub rate: Rate,
    pub resolved_by: Option<Strategy>,
    /// Strategy labels in the order they were attempted.
    pub strategy_chain: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub latency_ms: u64,
}

impl ResolvedRate {
    /// An entry with a known rate and no history, for tests and replays.
    pub fn observed(source: SourceId, rate: Rate) -> Self {
        Self {
            source,
            rate,
            resolved_by: rate.is_available().then_some(Strategy::Primary),
            strategy_chain: Vec::new(),
            diagnostics: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.rate.is_available()
    }
}

/// Primary strategy plus an optional single fallback.
#[derive(Clone)]
pub struct FallbackChain {
    primary: Arc<dyn RateSource>,
    fallback: Option<Arc<dyn RateSource>>,
}

impl FallbackChain {
    pub fn single(primary: Arc<dyn RateSource>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// The fallback fills the primary's slot regardless of its own id.
    pub fn with_fallback(primary: Arc<dyn RateSource>, fallback: Arc<dyn RateSource>) -> Self {
        Self {
            primary,
            fallback: Some(fallback),
        }
    }

    pub fn id(&self) -> SourceId {
        self.primary.id()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Runs the primary and, only if it fails, the fallback once.
    pub async fn resolve(&self) -> ResolvedRate {
        let started = Instant::now();
        let source = self.primary.id();
        let mut strategy_chain = vec![self.primary.label().to_owned()];
        let mut diagnostics = Vec::new();

        match self.primary.fetch_rate().await {
            Ok(rate) => {
                return ResolvedRate {
                    source,
                    rate,
                    resolved_by: Some(Strategy::Primary),
                    strategy_chain,
                    diagnostics,
                    latency_ms: elapsed_ms(started),
                };
            }
            Err(error) => {
                warn!(
                    source = %source,
                    strategy = self.primary.label(),
                    code = error.code(),
                    error = error.message(),
                    "primary strategy failed"
                );
                diagnostics.push(Diagnostic::new(source, self.primary.label(), &error));
            }
        }

        if let Some(fallback) = &self.fallback {
            info!(source = %source, strategy = fallback.label(), "trying fallback strategy");
            strategy_chain.push(fallback.label().to_owned());

            match fallback.fetch_rate().await {
                Ok(rate) => {
                    return ResolvedRate {
                        source,
                        rate,
                        resolved_by: Some(Strategy::Fallback),
                        strategy_chain,
                        diagnostics,
                        latency_ms: elapsed_ms(started),
                    };
                }
                Err(error) => {
                    warn!(
                        source = %source,
                        strategy = fallback.label(),
                        code = error.code(),
                        error = error.message(),
                        "fallback strategy failed"
                    );
                    diagnostics.push(Diagnostic::new(source, fallback.label(), &error));
                }
            }
        }

        ResolvedRate {
            source,
            rate: Rate::SENTINEL,
            resolved_by: None,
            strategy_chain,
            diagnostics,
            latency_ms: elapsed_ms(started),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
