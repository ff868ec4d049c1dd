use time::OffsetDateTime;

use tasa_core::{RatePipeline, RateReport, ReportSummary};

use crate::cli::Cli;
use crate::error::CliError;

use super::sources_config;

/// Everything the report renderer needs.
#[derive(Debug)]
pub struct ReportOutcome {
    pub generated_at: OffsetDateTime,
    pub report: RateReport,
    pub summary: ReportSummary,
}

pub async fn run(cli: &Cli) -> Result<ReportOutcome, CliError> {
    let config = sources_config(cli)?;
    let generated_at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    let report = RatePipeline::with_reqwest(&config).build_report().await;
    let summary = report.summarize(cli.baseline);

    Ok(ReportOutcome {
        generated_at,
        report,
        summary,
    })
}
