//! Turning raw form text into formula arguments.
//!
//! Blank numerators read as 0, blank or zero divisors read as 1. Anything
//! that is not a whole number is rejected.

use std::num::NonZeroU32;

use speedread_metrics::divisor_or_one;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a whole number: {0:?}")]
pub struct InvalidNumber(pub String);

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn whole(raw: &str) -> Result<u32, InvalidNumber> {
    raw.parse().map_err(|_| InvalidNumber(raw.to_string()))
}

/// A count that is multiplied or divided, never divided by.
pub fn numerator(raw: Option<&str>) -> Result<u32, InvalidNumber> {
    blank(raw).map_or(Ok(0), whole)
}

/// A sample size or duration that is divided by.
pub fn divisor(raw: Option<&str>) -> Result<NonZeroU32, InvalidNumber> {
    Ok(divisor_or_one(blank(raw).map_or(Ok(1), whole)?))
}

/// Like [`divisor`], but a blank or zero value is `None` rather than 1.
pub fn optional_divisor(raw: Option<&str>) -> Result<Option<NonZeroU32>, InvalidNumber> {
    Ok(NonZeroU32::new(numerator(raw)?))
}

/// Selected book id. An empty picker is `None`.
pub fn book_id(raw: Option<&str>) -> Option<i64> {
    blank(raw).and_then(|s| s.parse().ok())
}

/// Button click count; anything unreadable counts as not clicked.
pub fn clicks(raw: Option<&str>) -> u32 {
    blank(raw).and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Free text, trimmed. Missing text is empty.
pub fn text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}
