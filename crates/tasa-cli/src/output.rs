//! Report rendering. Stdout carries the report; notices go to stderr.

use std::io::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

use tasa_core::{Diagnostic, DiffResult, Rate, ReportSummary};

use crate::cli::OutputFormat;
use crate::commands::report::ReportOutcome;
use crate::commands::sources::SourceListing;
use crate::error::CliError;

const LABEL_WIDTH: usize = 18;
const MEAN_LABEL: &str = "Mean / Promedio";

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    generated_at: String,
    #[serde(flatten)]
    summary: &'a ReportSummary,
    diagnostics: Vec<&'a Diagnostic>,
}

pub fn render_report(
    outcome: &ReportOutcome,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let diagnostics = outcome.report.diagnostics().collect::<Vec<_>>();
    render_notices(&diagnostics)?;

    match format {
        OutputFormat::Json => {
            let document = ReportDocument {
                generated_at: outcome.generated_at.format(&Rfc3339)?,
                summary: &outcome.summary,
                diagnostics,
            };
            print_json(&document, pretty)
        }
        OutputFormat::Table => {
            let header = timestamp_header(outcome.generated_at)?;
            let mut stdout = io::stdout().lock();
            for line in report_lines(&header, &outcome.summary) {
                writeln!(stdout, "{line}")?;
            }
            Ok(())
        }
    }
}

pub fn render_sources(
    listings: &[SourceListing],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&listings, pretty),
        OutputFormat::Table => {
            let mut stdout = io::stdout().lock();
            for listing in listings {
                write_listing(&mut stdout, listing, "")?;
                if let Some(fallback) = &listing.fallback {
                    write_listing(&mut stdout, fallback, "  fallback: ")?;
                }
            }
            Ok(())
        }
    }
}

fn write_listing(out: &mut impl Write, listing: &SourceListing, prefix: &str) -> io::Result<()> {
    writeln!(
        out,
        "{prefix}{:<LABEL_WIDTH$} {:<14} {}",
        listing.id.as_str(),
        listing.extractor,
        listing.url
    )?;
    if let Some(rule) = &listing.rule {
        writeln!(out, "{prefix}{:<LABEL_WIDTH$} rule: {rule}", "")?;
    }
    Ok(())
}

fn render_notices(diagnostics: &[&Diagnostic]) -> Result<(), CliError> {
    let mut stderr = io::stderr().lock();
    for diagnostic in diagnostics {
        writeln!(
            stderr,
            "!!! {} via {}: {} ({})",
            diagnostic.source, diagnostic.strategy, diagnostic.message, diagnostic.code
        )?;
    }
    Ok(())
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(io::stdout().lock(), "{payload}")?;
    Ok(())
}

/// `dd/mm/yyyy HH:MM` in the offset of `generated_at`.
pub fn timestamp_header(generated_at: OffsetDateTime) -> Result<String, CliError> {
    Ok(generated_at.format(format_description!(
        "[day]/[month]/[year] [hour]:[minute]"
    ))?)
}

/// Lines of the table report, header first.
pub fn report_lines(header: &str, summary: &ReportSummary) -> Vec<String> {
    let mut lines = vec![header.to_owned(), "-".repeat(header.chars().count())];

    for row in &summary.rates {
        lines.push(format!(
            "{:<LABEL_WIDTH$} : {}",
            row.source.as_str(),
            format_optional_rate(row.rate)
        ));
    }

    lines.push(format!(
        "{MEAN_LABEL:<LABEL_WIDTH$} : {}",
        summary
            .mean
            .map(format_rate)
            .unwrap_or_else(|| String::from("n/a (insufficient data)"))
    ));

    if !summary.comparisons.is_empty() {
        lines.push(String::new());
    }
    for comparison in &summary.comparisons {
        lines.push(format!(
            "{} vs {} : {}",
            comparison.source,
            summary.baseline,
            format_optional_diff(comparison.diff)
        ));
    }

    match &summary.spread {
        Some(spread) => lines.push(format!(
            "max {} vs min {} : {}",
            spread.max,
            spread.min,
            format_diff(spread.diff)
        )),
        None => lines.push(String::from("max vs min : no data")),
    }

    lines
}

/// Two fractional digits with `,` thousands grouping.
pub fn format_rate(rate: Rate) -> String {
    group_thousands(&format!("{:.2}", rate.value()))
}

fn format_optional_rate(rate: Option<Rate>) -> String {
    rate.map(format_rate).unwrap_or_else(|| String::from("n/a"))
}

fn format_diff(diff: DiffResult) -> String {
    format!("{} ({}%)", signed(diff.absolute), signed(diff.percent))
}

fn format_optional_diff(diff: Option<DiffResult>) -> String {
    diff.map(format_diff).unwrap_or_else(|| String::from("n/a"))
}

fn signed(value: Decimal) -> String {
    let magnitude = group_thousands(&format!("{:.2}", value.abs()));
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{magnitude}")
    } else {
        format!("+{magnitude}")
    }
}

fn group_thousands(fixed: &str) -> String {
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed, ""));
    let digits = integer.chars().collect::<Vec<_>>();

    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}.{fraction}")
    }
}
