//! Third-party rate widget delivering a JS-wrapped JSON object.

use crate::config::EndpointConfig;
use crate::extract::EmbeddedJson;
use crate::{ConfigError, SourceId};

pub const URL: &str = "https://dxj1e0bbbefdtsyig.woldrssl.net/custom/rate.js";

pub const KEY_PATH: [&str; 2] = ["USD", "dolartoday"];

pub fn endpoint() -> Result<EndpointConfig, ConfigError> {
    Ok(EndpointConfig::new(
        SourceId::AggregatorWidget,
        "rate widget",
        URL,
        EmbeddedJson::new(KEY_PATH)?,
    ))
}
