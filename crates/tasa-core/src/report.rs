//! Rate report and aggregation.
//!
//! A [`RateReport`] is the immutable per-run mapping from [`SourceId`] to its
//! resolved rate. Aggregates only ever look at available rates; the sentinel
//! means "unknown" and must not drag a mean towards zero.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::fallback::{Diagnostic, ResolvedRate};
use crate::{AggregationError, DiffResult, Rate, SourceId};

/// Immutable result of one report run, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RateReport {
    entries: Vec<ResolvedRate>,
}

impl RateReport {
    /// Later entries for an already-present source are dropped.
    pub fn new(entries: Vec<ResolvedRate>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.source))
            .collect();
        Self { entries }
    }

    pub fn from_rates(rates: impl IntoIterator<Item = (SourceId, Rate)>) -> Self {
        Self::new(
            rates
                .into_iter()
                .map(|(source, rate)| ResolvedRate::observed(source, rate))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ResolvedRate] {
        &self.entries
    }

    pub fn rates(&self) -> impl Iterator<Item = (SourceId, Rate)> + '_ {
        self.entries.iter().map(|entry| (entry.source, entry.rate))
    }

    /// `None` when the source was not part of the run.
    pub fn rate(&self, source: SourceId) -> Option<Rate> {
        self.entries
            .iter()
            .find(|entry| entry.source == source)
            .map(|entry| entry.rate)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().flat_map(|entry| entry.diagnostics.iter())
    }

    pub fn unavailable(&self) -> Vec<SourceId> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_available())
            .map(|entry| entry.source)
            .collect()
    }

    pub fn mean(&self) -> Result<Rate, AggregationError> {
        mean(self.rates().map(|(_, rate)| rate))
    }

    /// Difference of `other` against `baseline`.
    ///
    /// Both an absent and a sentinel baseline are [`AggregationError::UndefinedBaseline`];
    /// an absent or sentinel `other` is [`AggregationError::UnavailableRate`].
    pub fn diff(&self, baseline: SourceId, other: SourceId) -> Result<DiffResult, AggregationError> {
        let baseline_rate = self
            .rate(baseline)
            .ok_or(AggregationError::UndefinedBaseline)?;
        let other_rate = self.rate(other).ok_or(AggregationError::UnavailableRate)?;
        DiffResult::between(baseline_rate, other_rate)
    }

    /// Everything a renderer needs, computed once.
    pub fn summarize(&self, baseline: SourceId) -> ReportSummary {
        let baseline_rate = self.rate(baseline).filter(|rate| rate.is_available());

        let comparisons = self
            .entries
            .iter()
            .filter(|entry| entry.source != baseline)
            .map(|entry| Comparison {
                source: entry.source,
                diff: baseline_rate
                    .filter(|_| entry.is_available())
                    .and_then(|base| DiffResult::between(base, entry.rate).ok()),
            })
            .collect();

        let spread = select_extremes(
            self.rates()
                .filter(|(source, rate)| *source != baseline && rate.is_available()),
        )
        .and_then(|extremes| {
            DiffResult::between(extremes.min.1, extremes.max.1)
                .ok()
                .map(|diff| Spread {
                    max: extremes.max.0,
                    max_rate: extremes.max.1,
                    min: extremes.min.0,
                    min_rate: extremes.min.1,
                    diff,
                })
        });

        ReportSummary {
            baseline,
            baseline_rate,
            rates: self
                .entries
                .iter()
                .map(|entry| SourceRate {
                    source: entry.source,
                    rate: entry.rate.is_available().then_some(entry.rate),
                })
                .collect(),
            mean: self.mean().ok(),
            comparisons,
            spread,
        }
    }
}

/// Arithmetic mean of the available rates, rounded half-even to two digits.
pub fn mean(rates: impl IntoIterator<Item = Rate>) -> Result<Rate, AggregationError> {
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;

    for value in rates.into_iter().filter_map(Rate::available) {
        sum = sum.checked_add(value).ok_or(AggregationError::Overflow)?;
        count += 1;
    }

    if count == 0 {
        return Err(AggregationError::InsufficientData);
    }

    let average = sum
        .checked_div(Decimal::from(count))
        .ok_or(AggregationError::Overflow)?;
    Rate::new(average).map_err(|_| AggregationError::Overflow)
}

/// Highest and lowest keyed rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes<K> {
    pub max: (K, Rate),
    pub min: (K, Rate),
}

/// Picks max and min with strict comparisons, so ties go to the first seen.
pub fn select_extremes<K: Copy>(items: impl IntoIterator<Item = (K, Rate)>) -> Option<Extremes<K>> {
    let mut items = items.into_iter();
    let first = items.next()?;
    let mut extremes = Extremes {
        max: first,
        min: first,
    };

    for item in items {
        if item.1 > extremes.max.1 {
            extremes.max = item;
        }
        if item.1 < extremes.min.1 {
            extremes.min = item;
        }
    }

    Some(extremes)
}

/// One row of the rates section; `None` means unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRate {
    pub source: SourceId,
    pub rate: Option<Rate>,
}

/// A non-baseline source compared to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub source: SourceId,
    pub diff: Option<DiffResult>,
}

/// Highest versus lowest non-baseline rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spread {
    pub max: SourceId,
    pub max_rate: Rate,
    pub min: SourceId,
    pub min_rate: Rate,
    /// `max_rate` against `min_rate`.
    pub diff: DiffResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub baseline: SourceId,
    pub baseline_rate: Option<Rate>,
    pub rates: Vec<SourceRate>,
    /// `None` when no source produced a usable rate.
    pub mean: Option<Rate>,
    pub comparisons: Vec<Comparison>,
    pub spread: Option<Spread>,
}

impl ReportSummary {
    pub fn has_data(&self) -> bool {
        self.mean.is_some()
    }
}
