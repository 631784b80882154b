use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use thiserror::Error;

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
const NUMERIC_ZONE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";
/// RFC 1123 without its zone, which is resolved separately by name.
const NAMED_ZONE_FORMAT: &str = "%d %b %Y %H:%M:%S";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised publish date {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

/// Parse an RSS `pubDate`, trying the numeric-offset form first and the
/// named-zone form second.
///
/// The leading weekday must be a valid abbreviation but is not checked
/// against the date, since feeds routinely get it wrong.
pub fn parse_pub_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let err = || DateParseError {
        raw: raw.to_string(),
    };

    let rest = strip_weekday(raw.trim()).ok_or_else(err)?;

    if let Ok(dt) = DateTime::parse_from_str(rest, NUMERIC_ZONE_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }

    parse_named_zone(rest).ok_or_else(err)
}

fn strip_weekday(s: &str) -> Option<&str> {
    let (day, rest) = s.split_once(", ")?;
    WEEKDAYS
        .iter()
        .any(|w| w.eq_ignore_ascii_case(day))
        .then_some(rest)
}

fn parse_named_zone(s: &str) -> Option<DateTime<Utc>> {
    let (stamp, zone) = s.rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(stamp, NAMED_ZONE_FORMAT).ok()?;
    let offset = FixedOffset::east_opt(zone_offset_secs(zone))?;
    let local = naive.and_local_timezone(offset).single()?;
    Some(local.with_timezone(&Utc))
}

/// Offsets for the zone names RFC 822 defines. Any other name is read as UTC.
fn zone_offset_secs(zone: &str) -> i32 {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => 0,
    };
    hours * 3600
}
