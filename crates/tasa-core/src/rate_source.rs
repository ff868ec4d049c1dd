//! Rate source contract and typed per-source outcomes.
//!
//! Every stage below the aggregator reports failure through [`SourceError`]:
//!
//! | Kind | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`SourceErrorKind::Unavailable`] | gateway | host unreachable, non-2xx status, timeout |
//! | [`SourceErrorKind::NotFound`] | extractor | expected element, pattern or json key is absent |
//! | [`SourceErrorKind::ParseFailure`] | normalizer | candidate is not a decimal literal |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use tracing::warn;

use crate::{NormalizeError, Rate, SourceId};

/// Per-source error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    Unavailable,
    NotFound,
    ParseFailure,
}

/// Structured per-source error used by the fallback chain and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::ParseFailure,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::ParseFailure => "source.parse_failure",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<NormalizeError> for SourceError {
    fn from(error: NormalizeError) -> Self {
        Self::parse_failure(error.to_string())
    }
}

/// One way of obtaining a rate for a [`SourceId`].
///
/// Implementations fetch, extract and normalize. They report failure as a
/// [`SourceError`]; converting that into the sentinel rate is the job of the
/// fallback chain, which is the failure boundary of a source.
pub trait RateSource: Send + Sync {
    /// The report slot this strategy fills.
    fn id(&self) -> SourceId;

    /// Human readable strategy name used in diagnostics.
    fn label(&self) -> &str;

    /// Fetches and normalizes one rate. Never returns the sentinel as `Ok`.
    fn fetch_rate<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Rate, SourceError>> + Send + 'a>>;

    /// Like [`fetch_rate`](RateSource::fetch_rate), but every failure becomes
    /// [`Rate::SENTINEL`] plus a warning.
    ///
    /// Convenience form for callers resolving a single strategy on its own.
    /// [`FallbackChain`](crate::FallbackChain) calls `fetch_rate` instead, since
    /// it needs the error to pick the fallback and to record a diagnostic.
    fn get_rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = Rate> + Send + 'a>> {
        Box::pin(async move {
            match self.fetch_rate().await {
                Ok(rate) => rate,
                Err(error) => {
                    warn!(
                        source = %self.id(),
                        strategy = self.label(),
                        code = error.code(),
                        error = error.message(),
                        "source failed; reporting sentinel rate"
                    );
                    Rate::SENTINEL
                }
            }
        })
    }
}
