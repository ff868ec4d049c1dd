use thiserror::Error;

/// Failures of the numeric normalizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("'{value}' is not a decimal literal")]
    InvalidLiteral { value: String },
    #[error("rate must be non-negative: '{value}'")]
    Negative { value: String },
    #[error("rate must be finite")]
    NonFinite,
    #[error("rate '{value}' is out of range")]
    OutOfRange { value: String },
}

/// Degenerate aggregation inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {
    #[error("insufficient data: no source produced a usable rate")]
    InsufficientData,
    #[error("percentage is undefined for a zero baseline")]
    UndefinedBaseline,
    #[error("compared rate is unavailable")]
    UnavailableRate,
    #[error("decimal overflow while aggregating rates")]
    Overflow,
}

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid source '{value}', expected one of central-bank, aggregator-widget, social-profile")]
    InvalidSource { value: String },
    #[error("invalid css selector '{selector}'")]
    InvalidSelector { selector: String },
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("json key path must not be empty")]
    EmptyKeyPath,
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
