//! CLI argument definitions for tasa.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `report` | Fetch every source and print the rate report (default) |
//! | `sources` | List configured sources and their extraction rules |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Exit with code 5 when any source is unavailable |
//! | `--baseline` | `central-bank` | Reference source for diffs |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--user-agent` | browser-like | Identification header |
//! | `--no-fallback` | `false` | Skip the central bank fallback |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! tasa
//! tasa --format json --pretty
//! tasa --baseline aggregator-widget --strict
//! tasa sources --verbose
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use tasa_core::config::{DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use tasa_core::SourceId;

/// tasa - US dollar exchange rate report
#[derive(Debug, Parser)]
#[command(
    name = "tasa",
    author,
    version,
    about = "US dollar exchange rate report from several public sources",
    long_about = "tasa scrapes the US dollar rate published by the central bank, an \
aggregator widget and a social profile, normalizes every figure to two decimals and \
prints each rate with the mean and the differences between sources.\n\
\n\
Unavailable sources are reported as n/a; the run never aborts because one source failed."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Exit with code 5 when any source was unavailable.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Source every other rate is compared against.
    #[arg(long, global = true, default_value_t = SourceId::CentralBank)]
    pub baseline: SourceId,

    /// Request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// User-Agent header sent to every source.
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Do not try the central bank's social profile when its page fails.
    #[arg(long, global = true, default_value_t = false)]
    pub no_fallback: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable report.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every source and print the rate report.
    Report,
    /// List configured sources.
    Sources(SourcesArgs),
}

#[derive(Debug, Args)]
pub struct SourcesArgs {
    /// Include extraction rules.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_report_against_central_bank() {
        let cli = Cli::parse_from(["tasa"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.baseline, SourceId::CentralBank);
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from(["tasa", "sources", "--verbose", "--format", "json"]);

        assert!(matches!(cli.command, Some(Command::Sources(SourcesArgs { verbose: true }))));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn baseline_accepts_legacy_names() {
        let cli = Cli::parse_from(["tasa", "--baseline", "dolartoday"]);
        assert_eq!(cli.baseline, SourceId::AggregatorWidget);

        assert!(Cli::try_parse_from(["tasa", "--baseline", "nope"]).is_err());
    }
}
