//! Public social-media profile pages.
//!
//! The same adapter serves every profile-style source: only the username,
//! the pattern and the slicer change.

use crate::config::EndpointConfig;
use crate::extract::{after_marker, RegexPattern, Slicer};
use crate::{ConfigError, SourceId};

pub const PROFILE_BASE_URL: &str = "https://www.instagram.com";

pub const USERNAME: &str = "enparalelovzla";

/// Posts read "… 2020 01:00 PM PROMEDIO Bs. 198.432,81"; the timestamp keeps
/// unrelated numbers on the page from matching.
pub const PATTERN: &str = r"(20\d\d) (..:..) (AM|PM) (PROMEDI(C|O) Bs. )([0-9.,]*)";

pub const MARKER: &str = "Bs.";

/// Parameters of a profile-style source.
#[derive(Clone)]
pub struct ProfileConfig {
    pub source: SourceId,
    pub base_url: String,
    pub username: String,
    pub pattern: String,
    pub slicer: Slicer,
}

impl ProfileConfig {
    pub fn new(
        source: SourceId,
        username: impl Into<String>,
        pattern: impl Into<String>,
        marker: &str,
    ) -> Self {
        Self {
            source,
            base_url: String::from(PROFILE_BASE_URL),
            username: username.into(),
            pattern: pattern.into(),
            slicer: after_marker(marker),
        }
    }

    pub fn enparalelovzla() -> Self {
        Self::new(SourceId::SocialProfile, USERNAME, PATTERN, MARKER)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_slicer(mut self, slicer: Slicer) -> Self {
        self.slicer = slicer;
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.username.trim_start_matches('@')
        )
    }

    pub fn endpoint(&self) -> Result<EndpointConfig, ConfigError> {
        Ok(EndpointConfig::new(
            self.source,
            format!("profile @{}", self.username.trim_start_matches('@')),
            self.url(),
            RegexPattern::with_slicer(&self.pattern, self.slicer.clone())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RawContent;
    use crate::normalize::RawRate;

    #[test]
    fn url_joins_base_and_username() {
        let profile = ProfileConfig::enparalelovzla().with_base_url("https://mirror.test/");

        assert_eq!(profile.url(), "https://mirror.test/enparalelovzla");
        let endpoint = profile.endpoint().expect("valid literals");
        assert_eq!(endpoint.label, "profile @enparalelovzla");
        assert_eq!(endpoint.source, SourceId::SocialProfile);
    }

    #[test]
    fn custom_slicer_replaces_the_marker_slice() {
        let slicer: Slicer = std::sync::Arc::new(|matched: &str| {
            matched.split_whitespace().last().map(str::to_owned)
        });
        let profile = ProfileConfig::new(SourceId::SocialProfile, "monitor", r"USD\s+[0-9.,]+", "Bs.")
            .with_slicer(slicer);
        let endpoint = profile.endpoint().expect("valid pattern");
        let content = RawContent::new(endpoint.url.clone(), "cierre USD 41,25 hoy");

        let candidate = endpoint.extractor.extract(&content).expect("pattern matches");

        assert_eq!(candidate, RawRate::Text(String::from("41,25")));
    }

    #[test]
    fn invalid_pattern_fails_endpoint_construction() {
        let profile = ProfileConfig::new(SourceId::SocialProfile, "someone", "([", "Bs.");

        assert!(matches!(
            profile.endpoint(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
