use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AggregationError, NormalizeError};

/// Exact fixed-point exchange rate with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// Fractional digits kept by every rate.
    pub const SCALE: u32 = 2;

    /// "Could not be determined".
    pub const SENTINEL: Self = Self(Decimal::ZERO);

    /// Builds a rate, rounding half-even to [`Rate::SCALE`] digits.
    pub fn new(value: Decimal) -> Result<Self, NormalizeError> {
        if value < Decimal::ZERO {
            return Err(NormalizeError::Negative {
                value: value.to_string(),
            });
        }
        Ok(Self(value.round_dp(Self::SCALE)))
    }

    pub const fn value(self) -> Decimal {
        self.0
    }

    pub fn is_sentinel(self) -> bool {
        self.0.is_zero()
    }

    /// True for anything strictly greater than the sentinel.
    pub fn is_available(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn available(self) -> Option<Decimal> {
        self.is_available().then_some(self.0)
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let value = Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Difference of `other` against a `baseline` rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// `other - baseline`.
    pub absolute: Decimal,
    /// `absolute / baseline * 100`, two fractional digits.
    pub percent: Decimal,
}

impl DiffResult {
    /// A sentinel `other` is [`AggregationError::UnavailableRate`], never a drop to zero.
    pub fn between(baseline: Rate, other: Rate) -> Result<Self, AggregationError> {
        if baseline.is_sentinel() {
            return Err(AggregationError::UndefinedBaseline);
        }
        if other.is_sentinel() {
            return Err(AggregationError::UnavailableRate);
        }

        let absolute = other
            .value()
            .checked_sub(baseline.value())
            .ok_or(AggregationError::Overflow)?;
        let percent = absolute
            .checked_div(baseline.value())
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(AggregationError::Overflow)?
            .round_dp(Rate::SCALE);

        Ok(Self { absolute, percent })
    }
}
