//! Amount Conversion
//!
//! Amounts travel on the wire as signed 64-bit stroops; one unit is
//! 10^7 stroops.

use super::{BuildError, BuildResult};

pub const STROOPS_PER_UNIT: i64 = 10_000_000;
pub const AMOUNT_DECIMALS: usize = 7;

/// Parse a non-negative decimal amount such as `"12.5"` into stroops
pub fn parse_amount(amount: &str) -> BuildResult<i64> {
    let trimmed = amount.trim();
    let invalid = |reason: &str| BuildError::InvalidAmount(format!("{:?}: {}", amount, reason));

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected digits with an optional decimal point"));
    }
    if fraction.len() > AMOUNT_DECIMALS {
        return Err(invalid("more than 7 decimal places"));
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("too large"))?
    };
    let fraction_value: i64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = AMOUNT_DECIMALS);
        padded.parse().map_err(|_| invalid("invalid fraction"))?
    };

    whole_value
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| invalid("too large"))
}

/// Stroops as a decimal string with all seven places, e.g. `"12.5000000"`
pub fn format_amount(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let magnitude = stroops.unsigned_abs();
    let unit = STROOPS_PER_UNIT as u64;
    format!(
        "{}{}.{:07}",
        sign,
        magnitude / unit,
        magnitude % unit
    )
}
