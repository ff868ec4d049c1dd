//! Field extractors.
//!
//! Each source publishes its rate in a different shape. An [`Extractor`] turns
//! fetched [`RawContent`] into a single candidate [`RawRate`] for the
//! normalizer; a new source shape is a new variant here, nothing else.
//!
//! | Variant | Content shape |
//! |---------|---------------|
//! | [`Extractor::DomSelector`] | HTML page with a uniquely identified element |
//! | [`Extractor::RegexPattern`] | Raw page text containing a marker-prefixed number |
//! | [`Extractor::EmbeddedJson`] | Script blob with a JSON object after the first `{` |

mod dom;
mod json;
mod pattern;

pub use dom::DomSelector;
pub use json::EmbeddedJson;
pub use pattern::{after_marker, RegexPattern, Slicer};

use crate::gateway::RawContent;
use crate::normalize::RawRate;
use crate::SourceError;

/// Extraction strategy for one source.
#[derive(Debug, Clone)]
pub enum Extractor {
    DomSelector(DomSelector),
    RegexPattern(RegexPattern),
    EmbeddedJson(EmbeddedJson),
}

impl Extractor {
    /// Pulls the candidate rate out of `content`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceErrorKind::NotFound`](crate::SourceErrorKind::NotFound)
    /// error when the expected element, pattern or key is absent.
    pub fn extract(&self, content: &RawContent) -> Result<RawRate, SourceError> {
        match self {
            Self::DomSelector(extractor) => extractor.extract(content),
            Self::RegexPattern(extractor) => extractor.extract(content),
            Self::EmbeddedJson(extractor) => extractor.extract(content),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DomSelector(_) => "dom-selector",
            Self::RegexPattern(_) => "regex-pattern",
            Self::EmbeddedJson(_) => "embedded-json",
        }
    }

    /// The selector, pattern or key path driving this extractor.
    pub fn rule(&self) -> String {
        match self {
            Self::DomSelector(extractor) => extractor.css().to_owned(),
            Self::RegexPattern(extractor) => extractor.pattern().to_owned(),
            Self::EmbeddedJson(extractor) => extractor.path().join("."),
        }
    }
}

impl From<DomSelector> for Extractor {
    fn from(value: DomSelector) -> Self {
        Self::DomSelector(value)
    }
}

impl From<RegexPattern> for Extractor {
    fn from(value: RegexPattern) -> Self {
        Self::RegexPattern(value)
    }
}

impl From<EmbeddedJson> for Extractor {
    fn from(value: EmbeddedJson) -> Self {
        Self::EmbeddedJson(value)
    }
}
