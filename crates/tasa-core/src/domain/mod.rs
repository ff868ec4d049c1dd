//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Rate`] | Local currency units per US dollar, two fractional digits |
//! | [`DiffResult`] | Absolute and percentage difference between two rates |
//!
//! A [`Rate`] of zero is the sentinel for "could not be determined". It is
//! never a real observation and every aggregate skips it.

mod rate;

pub use rate::{DiffResult, Rate};
