pub mod report;
pub mod sources;

use tasa_core::{HttpConfig, SourcesConfig};

use crate::cli::Cli;
use crate::error::CliError;

/// Source configuration with the global transport flags applied.
pub fn sources_config(cli: &Cli) -> Result<SourcesConfig, CliError> {
    let http = HttpConfig::default()
        .with_user_agent(cli.user_agent.as_str())
        .with_timeout_ms(cli.timeout_ms)?;

    let config = SourcesConfig::standard()?.with_http(http);
    if cli.no_fallback {
        return Ok(config.without_fallback());
    }
    Ok(config)
}
