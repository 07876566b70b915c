use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};

use crate::error::{Error, Result};

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_DAY: i64 = 24 * 60 * MS_PER_MINUTE;

pub const MINUTES_IN_DAY: f64 = 1440.0;
pub const MINUTES_IN_ALMOST_TWO_DAYS: f64 = 2520.0;
pub const MINUTES_IN_MONTH: f64 = 43200.0;
pub const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;
pub const MINUTES_IN_YEAR: f64 = 525600.0;

/// Parse a target instant from user input.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD` in local wall
/// time, or integer epoch milliseconds.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ms) = input.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| Error::InvalidTimestamp(input.to_string()));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return local_to_utc(naive, input);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return local_to_utc(midnight, input);
    }

    Err(Error::InvalidTimestamp(input.to_string()))
}

fn local_to_utc(naive: NaiveDateTime, input: &str) -> Result<DateTime<Utc>> {
    // Ambiguous wall times (DST fold) resolve to the earlier instant.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::InvalidTimestamp(input.to_string()))
}

/// Whole calendar months from `earlier` to `later`, never negative.
pub fn whole_months_between(earlier: &DateTime<FixedOffset>, later: &DateTime<FixedOffset>) -> i64 {
    if later <= earlier {
        return 0;
    }

    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);

    // The last month only counts once its day and time are reached.
    let earlier_pos = (
        earlier.day(),
        earlier.hour(),
        earlier.minute(),
        earlier.second(),
        earlier.nanosecond(),
    );
    let later_pos = (
        later.day(),
        later.hour(),
        later.minute(),
        later.second(),
        later.nanosecond(),
    );
    if later_pos < earlier_pos {
        months -= 1;
    }

    months.max(0)
}
