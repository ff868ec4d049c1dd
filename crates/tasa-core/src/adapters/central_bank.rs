//! Central bank home page, with its own public profile as fallback.

use crate::adapters::social_profile::ProfileConfig;
use crate::config::EndpointConfig;
use crate::extract::DomSelector;
use crate::{ConfigError, SourceId};

pub const URL: &str = "http://www.bcv.org.ve";

/// The USD box on the home page: `<div id="dolar">…<strong>36,52</strong>`.
pub const SELECTOR: &str = "#dolar strong";

pub const FALLBACK_USERNAME: &str = "bcv.org.ve";
pub const FALLBACK_PATTERN: &str = r"(?i:d[oó]lar|usd)\W+Bs\.\s*[0-9][0-9.,]*";
pub const FALLBACK_MARKER: &str = "Bs.";

pub fn endpoint() -> Result<EndpointConfig, ConfigError> {
    Ok(EndpointConfig::new(
        SourceId::CentralBank,
        "central bank page",
        URL,
        DomSelector::new(SELECTOR)?,
    ))
}

/// The bank's profile mirror of the same rate.
pub fn fallback_endpoint() -> Result<EndpointConfig, ConfigError> {
    fallback_profile().endpoint()
}

pub fn fallback_profile() -> ProfileConfig {
    ProfileConfig::new(
        SourceId::CentralBank,
        FALLBACK_USERNAME,
        FALLBACK_PATTERN,
        FALLBACK_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RawContent;
    use crate::normalize::RawRate;

    #[test]
    fn fallback_pattern_reads_the_profile_caption() {
        let endpoint = fallback_endpoint().expect("valid literals");
        let content = RawContent::new(
            endpoint.url.clone(),
            r#"{"caption":"Tipo de cambio oficial. Dólar: Bs. 36,5202. Euro: Bs. 40,11"}"#,
        );

        let candidate = endpoint.extractor.extract(&content).expect("caption matches");

        assert_eq!(candidate, RawRate::Text(String::from("36,5202")));
        assert_eq!(endpoint.url, "https://www.instagram.com/bcv.org.ve");
    }
}
