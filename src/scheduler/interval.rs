use std::time::Duration;

use crate::app::{GatorError, Result};

/// Parse an interval such as `"90s"`, `"30m"`, `"1h"`, `"1d"` or `"1m30s"`.
///
/// Components may be combined; a bare number is read as seconds. Zero
/// intervals are rejected.
pub fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err(GatorError::Config("Interval must not be empty".into()));
    }

    if let Ok(secs) = s.parse::<u64>() {
        return positive(Duration::from_secs(secs), &s);
    }

    let mut total = Duration::ZERO;
    let mut rest = s.as_str();

    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid(&s));
        }
        let value: u64 = rest[..digits].parse().map_err(|_| invalid(&s))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let millis_per_unit: u64 = match &rest[..unit_len] {
            "ms" => 1,
            "s" => 1_000,
            "m" => 60_000,
            "h" => 3_600_000,
            "d" => 86_400_000,
            _ => return Err(invalid(&s)),
        };
        rest = &rest[unit_len..];

        let millis = value.checked_mul(millis_per_unit).ok_or_else(|| invalid(&s))?;
        total += Duration::from_millis(millis);
    }

    positive(total, &s)
}

/// Format an interval for display, using the largest unit that divides it.
pub fn format_interval(d: Duration) -> String {
    let secs = d.as_secs();
    if d.subsec_millis() != 0 || secs == 0 {
        format!("{}ms", d.as_millis())
    } else if secs >= 86400 && secs.is_multiple_of(86400) {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs.is_multiple_of(3600) {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs.is_multiple_of(60) {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

fn positive(d: Duration, s: &str) -> Result<Duration> {
    if d.is_zero() {
        Err(GatorError::Config(format!("Interval must be positive: {}", s)))
    } else {
        Ok(d)
    }
}

fn invalid(s: &str) -> GatorError {
    GatorError::Config(format!(
        "Invalid interval: {}. Use a format like '30s', '1m', '1h30m'",
        s
    ))
}
