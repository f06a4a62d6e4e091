//! Value validators for filter parameters.
//!
//! Each validator is a pure predicate over the raw query-string text. The
//! filter tables decide which validator applies to which parameter and which
//! error kind a rejection maps to.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Returns true when the value parses as a finite number.
///
/// Integers and decimals both pass; `inf`, `NaN` and anything else parseable
/// into a non-finite float do not.
///
/// # Examples
///
/// ```
/// use keebdex::catalog::validate::is_numeric;
///
/// assert!(is_numeric("42"));
/// assert!(is_numeric("79.5"));
/// assert!(!is_numeric("heavy"));
/// ```
#[must_use]
pub fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Returns true when the value is exactly four ASCII digits.
#[must_use]
pub fn is_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true when the value is a real `yyyy-mm-dd` calendar date.
///
/// The shape check keeps chrono from accepting loose variants like
/// `2021-1-5`; the parse rejects impossible dates like `2021-02-30`.
#[must_use]
pub fn is_date(value: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

    shape.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Coerces a boolean-ish filter value.
///
/// Case-insensitive `1`, `true`, `on` and `yes` are true. Everything else,
/// including garbage text, is false rather than an error; boolean filters
/// are deliberately loose.
#[must_use]
pub fn as_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
