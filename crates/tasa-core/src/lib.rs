//! # Tasa Core
//!
//! Scrapes the US dollar exchange rate published by several independent
//! sources, normalizes each figure to an exact two-digit decimal and
//! aggregates the results.
//!
//! ## Overview
//!
//! - **Rate domain** with a zero sentinel for "could not be determined"
//! - **Normalizer** for regional number formats (`36,5202`, `1.234,56`, `227.123.45`)
//! - **Gateway** for one best-effort HTTP fetch per source
//! - **Extractors** driven by css selectors, regex patterns or embedded json
//! - **Fallback chain** with a single fallback for the central bank
//! - **Aggregation** of mean, diffs against a baseline and max/min spread
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Per-source endpoint configuration and the shared adapter |
//! | [`config`] | URLs, patterns and transport settings |
//! | [`domain`] | [`Rate`] and [`DiffResult`] |
//! | [`error`] | Normalization, aggregation and configuration errors |
//! | [`extract`] | Field extractors |
//! | [`fallback`] | Primary/fallback resolution and diagnostics |
//! | [`gateway`] | Raw content fetching |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Numeric normalizer |
//! | [`pipeline`] | One report run across all sources |
//! | [`rate_source`] | Rate source trait and source errors |
//! | [`report`] | Report and aggregates |
//! | [`source`] | Source identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tasa_core::{RatePipeline, SourceId, SourcesConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SourcesConfig::standard()?;
//!     let report = RatePipeline::with_reqwest(&config).build_report().await;
//!
//!     let summary = report.summarize(SourceId::CentralBank);
//!     if let Some(mean) = summary.mean {
//!         println!("mean: {mean}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Rate Pipeline  │────▶│ Fallback Chain   │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Rate Report    │     │ Source Adapter   │
//! │  (aggregates)   │     └────────┬─────────┘
//! └─────────────────┘              │
//!                                  ▼
//!           ┌───────────┬──────────┴──────────┐
//!           ▼           ▼                     ▼
//!     ┌──────────┐ ┌───────────┐       ┌────────────┐
//!     │ Gateway  │ │ Extractor │       │ Normalizer │
//!     └──────────┘ └───────────┘       └────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Source failures are values, not aborts. Adapters return a
//! [`SourceError`]; the fallback chain turns it into [`Rate::SENTINEL`] plus a
//! diagnostic:
//!
//! ```rust
//! use tasa_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::Unavailable => "host down or blocked",
//!         SourceErrorKind::NotFound => "page layout changed",
//!         SourceErrorKind::ParseFailure => "unexpected number format",
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod gateway;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod rate_source;
pub mod report;
pub mod source;

// Adapter implementation
pub use adapters::SourceAdapter;

// Configuration
pub use config::{EndpointConfig, HttpConfig, SourcesConfig};

// Domain models
pub use domain::{DiffResult, Rate};

// Error types
pub use error::{AggregationError, ConfigError, NormalizeError};

// Extractors
pub use extract::{DomSelector, EmbeddedJson, Extractor, RegexPattern};

// Fallback resolution
pub use fallback::{Diagnostic, FallbackChain, ResolvedRate, Strategy};

// Gateway and HTTP client types
pub use gateway::{RawContent, SourceGateway};
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Normalizer
pub use normalize::{normalize, RawRate};

// Report run and aggregates
pub use pipeline::RatePipeline;
pub use report::{
    mean, select_extremes, Comparison, Extremes, RateReport, ReportSummary, SourceRate, Spread,
};

// Rate source trait
pub use rate_source::{RateSource, SourceError, SourceErrorKind};

// Source identifiers
pub use source::SourceId;
