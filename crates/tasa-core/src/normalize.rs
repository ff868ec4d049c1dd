//! Numeric normalizer.
//!
//! Turns the loosely formatted numbers published by each source into an exact
//! [`Rate`]. Text inputs may use either `.` or `,` as the decimal separator and
//! may carry stray thousands separators. The separator heuristic, applied in
//! order:
//!
//! 1. Both `.` and `,` present: `.` groups thousands, `,` is the decimal mark
//!    (`"227.123,45"` → `227123.45`).
//! 2. Only `.`, more than once: every `.` but the last groups thousands
//!    (`"1.234.56"` → `1234.56`).
//! 3. Only `,`: every `,` but the last groups thousands and the last one is
//!    the decimal mark (`"6,43"` → `6.43`).
//! 4. Otherwise the text is parsed as a plain decimal literal.
//!
//! A single `.` followed by three digits (`"1.234"`) is ambiguous; rule 4 reads
//! it as a decimal point.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{NormalizeError, Rate};

/// A candidate rate as delivered by an extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRate {
    /// Free-form numeric text of unknown locale convention.
    Text(String),
    /// A native floating point number from a structured payload.
    Float(f64),
    /// An already exact value.
    Exact(Decimal),
    /// Nothing was delivered.
    Missing,
}

impl From<&str> for RawRate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawRate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawRate {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for RawRate {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

impl From<Rate> for RawRate {
    fn from(value: Rate) -> Self {
        Self::Exact(value.value())
    }
}

impl<T: Into<RawRate>> From<Option<T>> for RawRate {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Normalizes any supported input into a [`Rate`].
///
/// Empty text and [`RawRate::Missing`] yield [`Rate::SENTINEL`].
///
/// # Errors
///
/// Returns [`NormalizeError`] when the cleaned text is not a decimal literal,
/// or when the value is negative, non-finite or out of range.
pub fn normalize(input: impl Into<RawRate>) -> Result<Rate, NormalizeError> {
    match input.into() {
        RawRate::Text(text) => normalize_text(&text),
        RawRate::Float(value) => normalize_float(value),
        RawRate::Exact(value) => Rate::new(value),
        RawRate::Missing => Ok(Rate::SENTINEL),
    }
}

fn normalize_text(text: &str) -> Result<Rate, NormalizeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Rate::SENTINEL);
    }

    let cleaned = canonicalize_separators(text);
    let value = parse_literal(&cleaned, text)?;
    Rate::new(value)
}

fn normalize_float(value: f64) -> Result<Rate, NormalizeError> {
    if !value.is_finite() {
        return Err(NormalizeError::NonFinite);
    }
    if value < 0.0 {
        return Err(NormalizeError::Negative {
            value: value.to_string(),
        });
    }

    let exact = Decimal::from_f64_retain(value).ok_or_else(|| NormalizeError::OutOfRange {
        value: value.to_string(),
    })?;
    Rate::new(exact)
}

/// Rewrites `text` so that `.` is the only (decimal) separator left.
pub fn canonicalize_separators(text: &str) -> String {
    let dots = text.matches('.').count();
    let commas = text.matches(',').count();

    match (dots, commas) {
        (0, 0) => text.to_owned(),
        (_, 0) if dots > 1 => keep_last_separator(text, '.'),
        (_, 0) => text.to_owned(),
        (0, _) => keep_last_separator(text, ','),
        _ => text.replace('.', "").replace(',', "."),
    }
}

fn keep_last_separator(text: &str, separator: char) -> String {
    let Some(split) = text.rfind(separator) else {
        return text.to_owned();
    };

    let mut output = String::with_capacity(text.len());
    output.extend(text[..split].chars().filter(|ch| *ch != separator));
    output.push('.');
    output.push_str(&text[split + separator.len_utf8()..]);
    output
}

fn parse_literal(cleaned: &str, original: &str) -> Result<Decimal, NormalizeError> {
    let invalid = || NormalizeError::InvalidLiteral {
        value: original.to_owned(),
    };

    let (negative, digits) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned),
    };

    let mut seen_digit = false;
    let mut seen_point = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return Err(invalid()),
        }
    }
    if !seen_digit {
        return Err(invalid());
    }

    let value = Decimal::from_str(cleaned).map_err(|_| NormalizeError::OutOfRange {
        value: original.to_owned(),
    })?;

    if negative && !value.is_zero() {
        return Err(NormalizeError::Negative {
            value: original.to_owned(),
        });
    }
    Ok(value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(input: impl Into<RawRate>) -> Decimal {
        normalize(input).expect("normalizable").value()
    }

    #[test]
    fn dot_thousands_with_comma_decimal() {
        assert_eq!(rate("227.123,45"), dec!(227123.45));
        assert_eq!(rate("1.234.567,8"), dec!(1234567.80));
    }

    #[test]
    fn repeated_dots_keep_the_last_as_decimal_point() {
        assert_eq!(rate("1.234.56"), dec!(1234.56));
    }

    #[test]
    fn comma_only_is_a_decimal_comma() {
        assert_eq!(rate("6,43"), dec!(6.43));
        assert_eq!(rate("1,234,56"), dec!(1234.56));
    }

    #[test]
    fn plain_literals_parse_directly() {
        assert_eq!(rate("36.52"), dec!(36.52));
        assert_eq!(rate("  42 "), dec!(42));
        assert_eq!(rate("1.234"), dec!(1.23));
    }

    #[test]
    fn empty_and_missing_inputs_are_the_sentinel() {
        assert_eq!(normalize(""), Ok(Rate::SENTINEL));
        assert_eq!(normalize("   "), Ok(Rate::SENTINEL));
        assert_eq!(normalize(RawRate::Missing), Ok(Rate::SENTINEL));
        assert_eq!(normalize(None::<&str>), Ok(Rate::SENTINEL));
    }

    #[test]
    fn floats_round_to_two_digits() {
        assert_eq!(rate(226_984.123_f64), dec!(226984.12));
        assert_eq!(rate(6.4_f64), dec!(6.40));
    }

    #[test]
    fn garbage_is_a_parse_failure() {
        for input in ["abc", "12a", ".", "1..2,3,", "--5", "1 000"] {
            assert!(
                matches!(normalize(input), Err(NormalizeError::InvalidLiteral { .. })),
                "expected parse failure for {input:?}"
            );
        }
    }

    #[test]
    fn negative_and_non_finite_values_fail() {
        assert!(matches!(normalize("-3,5"), Err(NormalizeError::Negative { .. })));
        assert!(matches!(normalize(-1.0_f64), Err(NormalizeError::Negative { .. })));
        assert_eq!(normalize(f64::NAN), Err(NormalizeError::NonFinite));
        assert_eq!(normalize(f64::INFINITY), Err(NormalizeError::NonFinite));
    }

    #[test]
    fn canonicalize_leaves_single_dot_untouched() {
        assert_eq!(canonicalize_separators("36.52"), "36.52");
        assert_eq!(canonicalize_separators("1.000.000"), "1000.000");
    }
}
