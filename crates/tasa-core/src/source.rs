use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Canonical identifiers for the rate-publishing sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceId {
    CentralBank,
    AggregatorWidget,
    SocialProfile,
}

impl SourceId {
    /// Fetch order used when building a report.
    pub const ALL: [Self; 3] = [Self::CentralBank, Self::AggregatorWidget, Self::SocialProfile];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CentralBank => "central-bank",
            Self::AggregatorWidget => "aggregator-widget",
            Self::SocialProfile => "social-profile",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "central-bank" | "central_bank" | "bcv" => Ok(Self::CentralBank),
            "aggregator-widget" | "aggregator_widget" | "dolartoday" => {
                Ok(Self::AggregatorWidget)
            }
            "social-profile" | "social_profile" | "enparalelovzla" => Ok(Self::SocialProfile),
            other => Err(ConfigError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_and_legacy_aliases() {
        assert_eq!("central-bank".parse::<SourceId>().ok(), Some(SourceId::CentralBank));
        assert_eq!("DolarToday".parse::<SourceId>().ok(), Some(SourceId::AggregatorWidget));
        assert_eq!(" social_profile ".parse::<SourceId>().ok(), Some(SourceId::SocialProfile));
    }

    #[test]
    fn rejects_unknown_source_names() {
        let error = "yahoo".parse::<SourceId>().expect_err("unknown source");
        assert!(error.to_string().contains("yahoo"));
    }

    #[test]
    fn display_matches_serde_name() {
        for id in SourceId::ALL {
            let json = serde_json::to_string(&id).expect("serializable");
            assert_eq!(json, format!("\"{id}\""));
        }
    }
}
