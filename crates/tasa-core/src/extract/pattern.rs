use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use regex::Regex;

use crate::gateway::RawContent;
use crate::normalize::RawRate;
use crate::{ConfigError, SourceError};

/// Turns the text of a pattern match into the rate substring.
pub type Slicer = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Slices everything after the first `marker` in the match, trimmed.
///
/// Trailing separators (sentence punctuation) are dropped.
pub fn after_marker(marker: impl Into<String>) -> Slicer {
    let marker = marker.into();
    Arc::new(move |matched: &str| {
        let start = matched.find(marker.as_str())? + marker.len();
        let rate = matched[start..]
            .trim()
            .trim_end_matches(['.', ','])
            .trim_end();
        (!rate.is_empty()).then(|| rate.to_owned())
    })
}

/// Searches raw page text for a marker-prefixed number.
#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    slicer: Slicer,
}

impl RegexPattern {
    /// Pattern whose match is sliced after `marker`.
    pub fn new(pattern: &str, marker: &str) -> Result<Self, ConfigError> {
        Self::with_slicer(pattern, after_marker(marker))
    }

    pub fn with_slicer(pattern: &str, slicer: Slicer) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|error| ConfigError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: error.to_string(),
        })?;
        Ok(Self { regex, slicer })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn extract(&self, content: &RawContent) -> Result<RawRate, SourceError> {
        let text = content.body().trim();

        let Some(found) = self.regex.find(text) else {
            if looks_like_login_wall(text) {
                return Err(SourceError::not_found(format!(
                    "{} served a login page instead of the expected profile",
                    content.url()
                )));
            }
            return Err(SourceError::not_found(format!(
                "pattern '{}' did not match {}",
                self.regex.as_str(),
                content.url()
            )));
        };

        (self.slicer)(found.as_str())
            .map(RawRate::Text)
            .ok_or_else(|| {
                SourceError::not_found(format!(
                    "match '{}' on {} carries no rate",
                    found.as_str(),
                    content.url()
                ))
            })
    }
}

impl Debug for RegexPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexPattern")
            .field("regex", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

/// A login wall posts to the accounts login form and says so in its title.
/// Profile pages link to login too, so neither signal is enough alone.
fn looks_like_login_wall(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    let login_form = text.contains("action=\"/accounts/login");
    let login_title = text
        .split_once("<title")
        .and_then(|(_, rest)| rest.split_once("</title>"))
        .is_some_and(|(title, _)| title.contains("login") || title.contains("log in"));
    login_form && login_title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceErrorKind;

    const PROFILE_PATTERN: &str = r"(20\d\d) (..:..) (AM|PM) (PROMEDI(C|O) Bs. )([0-9.,]*)";

    fn content(body: &str) -> RawContent {
        RawContent::new("https://profile.example.test/enparalelovzla", body)
    }

    #[test]
    fn slices_the_rate_after_the_marker() {
        let extractor = RegexPattern::new(PROFILE_PATTERN, "Bs.").expect("valid pattern");
        let body = r#"{"caption":"🗓 03/06/2020 01:00 PM PROMEDIO Bs. 198.432,81 🔺 0,52%"}"#;

        let candidate = extractor.extract(&content(body)).expect("pattern matches");

        assert_eq!(candidate, RawRate::Text(String::from("198.432,81")));
    }

    #[test]
    fn unrelated_numbers_without_context_are_ignored() {
        let extractor = RegexPattern::new(PROFILE_PATTERN, "Bs.").expect("valid pattern");
        let body = "Followers 1.234.567 Posts 8.912 PROMEDIO Bs. 99";

        let error = extractor.extract(&content(body)).expect_err("no timestamp context");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("did not match"));
    }

    #[test]
    fn login_wall_is_reported_as_such() {
        let extractor = RegexPattern::new(PROFILE_PATTERN, "Bs.").expect("valid pattern");
        let body = r#"<title>Login • Instagram</title>
            <form action="/accounts/login/"><button>Log in</button></form>
            <script>window.__loginRedirect = "/accounts/login/?next=/enparalelovzla/";</script>"#;

        let error = extractor.extract(&content(body)).expect_err("login wall");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("login page"));
    }

    #[test]
    fn profile_page_with_login_links_is_a_plain_miss() {
        let extractor = RegexPattern::new(PROFILE_PATTERN, "Bs.").expect("valid pattern");
        let body = r#"<title>Monitor Dólar (@enparalelovzla) • Instagram</title>
            <a href="/accounts/login/">Log in</a> <a href="/accounts/login/?next=/p/1/">login</a>
            <script>{"login_url":"/accounts/login/","show_login":true}</script>
            <p>Hoy no hay promedio publicado</p>"#;

        let error = extractor.extract(&content(body)).expect_err("no rate posted");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("did not match"), "{}", error.message());
    }

    #[test]
    fn after_marker_trims_trailing_punctuation() {
        let slicer = after_marker("Bs.");

        assert_eq!(slicer("Dólar Bs. 36,52.").as_deref(), Some("36,52"));
        assert_eq!(slicer("Dólar Bs. ").as_deref(), None);
        assert_eq!(slicer("no marker here"), None);
    }

    #[test]
    fn custom_slicers_are_supported() {
        let last_word: Slicer =
            Arc::new(|matched: &str| matched.split_whitespace().last().map(str::to_owned));
        let extractor =
            RegexPattern::with_slicer(r"USD\s+[0-9,]+", last_word).expect("valid pattern");

        let candidate = extractor.extract(&content("rate USD 36,52 today")).expect("match");

        assert_eq!(candidate, RawRate::Text(String::from("36,52")));
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let error = RegexPattern::new("(unclosed", "Bs.").expect_err("invalid pattern");
        assert!(matches!(error, ConfigError::InvalidPattern { .. }));
    }
}
