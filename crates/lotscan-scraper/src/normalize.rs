//! Numeric normalization for price, mileage, and model year.
//!
//! Sources hand these over as display text (`"$24,995.00"`, `"32,104 mi"`,
//! `"2024-01-01"`). Each normalizer pulls out the first number-like run and
//! converts it; text with no usable number comes back as
//! [`Numeric::Raw`] holding the original string untouched.

use std::sync::LazyLock;

use lotscan_core::Numeric;
use regex::Regex;

static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d{2})?").expect("valid regex"));

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("valid regex"));

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("valid regex"));

/// Parses the first price-like run (thousands separators, optional cents).
#[must_use]
pub fn normalize_price(raw: &str) -> Numeric<f64> {
    PRICE
        .find(raw)
        .and_then(|m| strip_separators(m.as_str()).parse::<f64>().ok())
        .map_or_else(|| Numeric::Raw(raw.to_string()), Numeric::Parsed)
}

/// Parses the first integer-like run (thousands separators allowed).
#[must_use]
pub fn normalize_mileage(raw: &str) -> Numeric<i64> {
    INTEGER
        .find(raw)
        .and_then(|m| strip_separators(m.as_str()).parse::<i64>().ok())
        .map_or_else(|| Numeric::Raw(raw.to_string()), Numeric::Parsed)
}

/// Parses the first standalone four-digit run as a model year.
#[must_use]
pub fn normalize_year(raw: &str) -> Numeric<i32> {
    YEAR.captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .map_or_else(|| Numeric::Raw(raw.to_string()), Numeric::Parsed)
}

fn strip_separators(digits: &str) -> String {
    digits.replace(',', "")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
