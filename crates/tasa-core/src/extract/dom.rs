use scraper::{Html, Selector};

use crate::gateway::RawContent;
use crate::normalize::RawRate;
use crate::{ConfigError, SourceError};

/// Reads the inner text of the first element matching a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSelector {
    css: String,
}

impl DomSelector {
    pub fn new(css: impl Into<String>) -> Result<Self, ConfigError> {
        let css = css.into();
        if Selector::parse(&css).is_err() {
            return Err(ConfigError::InvalidSelector { selector: css });
        }
        Ok(Self { css })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn extract(&self, content: &RawContent) -> Result<RawRate, SourceError> {
        let selector = Selector::parse(&self.css)
            .map_err(|_| SourceError::not_found(format!("selector '{}' is invalid", self.css)))?;
        let document = Html::parse_document(content.body());

        let element = document.select(&selector).next().ok_or_else(|| {
            SourceError::not_found(format!(
                "no element matches '{}' on {}",
                self.css,
                content.url()
            ))
        })?;

        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            return Err(SourceError::not_found(format!(
                "element '{}' on {} has no text",
                self.css,
                content.url()
            )));
        }

        Ok(RawRate::Text(text.to_owned()))
    }
}
