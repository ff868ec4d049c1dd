mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Some(Command::Sources(args)) => {
            let listings = commands::sources::run(cli, args)?;
            output::render_sources(&listings, cli.format, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Report) | None => {
            let outcome = commands::report::run(cli).await?;
            output::render_report(&outcome, cli.format, cli.pretty)?;

            let unavailable = outcome.report.unavailable().len();
            if cli.strict && unavailable > 0 {
                return Err(CliError::StrictModeViolation { unavailable });
            }

            if !outcome.summary.has_data() {
                tracing::warn!("no source produced a usable rate");
                return Ok(ExitCode::from(3));
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
