//! Unit banding for relative phrases.
//!
//! Strict style: `< 1 min` seconds, `< 60 min` minutes, `< 24 h` hours,
//! `< 30 days` days (weeks from 7 days when enabled), `< 12 months` months,
//! then years. Months are 30 days and years 365 days; the count comes from
//! the configured rounding method and a month count rounding to 12 becomes
//! one year.
//!
//! Approximate style: `< 2 min` less-than-a-minute / one minute (or second
//! bands of 5, 10, 20, half a minute, less than a minute), `< 45 min`
//! minutes, `< 90 min` about an hour, `< 24 h` about N hours, `< 42 h` one
//! day, `< 30 days` days, `< 60 days` about N months, then calendar months
//! below a year and about / over / almost N years after that.
//!
//! Day-and-above magnitudes use wall-clock time, so a DST change between the
//! two instants does not shift the day count.

use chrono::{DateTime, FixedOffset};

use crate::display::config::{DistanceOptions, DistanceStyle};
use crate::locale::DistanceToken;
use crate::util::time::{
    MINUTES_IN_ALMOST_TWO_DAYS, MINUTES_IN_DAY, MINUTES_IN_MONTH, MINUTES_IN_TWO_MONTHS,
    MINUTES_IN_YEAR, MS_PER_MINUTE, MS_PER_SECOND, whole_months_between,
};

const MINUTES_IN_WEEK: f64 = 7.0 * MINUTES_IN_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distance {
    pub token: DistanceToken,
    pub count: i64,
}

impl Distance {
    fn new(token: DistanceToken, count: i64) -> Self {
        Self { token, count }
    }
}

/// Picks the token and count for the span between two instants, in either
/// order.
pub fn select(
    a: &DateTime<FixedOffset>,
    b: &DateTime<FixedOffset>,
    options: &DistanceOptions,
) -> Distance {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    match options.style {
        DistanceStyle::Strict => strict(earlier, later, options),
        DistanceStyle::Approximate => approximate(earlier, later, options.include_seconds),
    }
}

fn offset_delta_ms(earlier: &DateTime<FixedOffset>, later: &DateTime<FixedOffset>) -> i64 {
    let delta_secs =
        later.offset().local_minus_utc() as i64 - earlier.offset().local_minus_utc() as i64;
    delta_secs * MS_PER_SECOND
}

fn strict(
    earlier: &DateTime<FixedOffset>,
    later: &DateTime<FixedOffset>,
    options: &DistanceOptions,
) -> Distance {
    let round = |v: f64| options.rounding.apply(v);

    let ms = (*later - *earlier).num_milliseconds();
    let minutes = ms as f64 / MS_PER_MINUTE as f64;
    let wall_minutes = (ms + offset_delta_ms(earlier, later)) as f64 / MS_PER_MINUTE as f64;

    if minutes < 1.0 {
        Distance::new(DistanceToken::XSeconds, round(ms as f64 / MS_PER_SECOND as f64))
    } else if minutes < 60.0 {
        Distance::new(DistanceToken::XMinutes, round(minutes))
    } else if minutes < MINUTES_IN_DAY {
        Distance::new(DistanceToken::XHours, round(minutes / 60.0))
    } else if wall_minutes < MINUTES_IN_MONTH {
        if options.use_weeks && wall_minutes >= MINUTES_IN_WEEK {
            Distance::new(DistanceToken::XWeeks, round(wall_minutes / MINUTES_IN_WEEK))
        } else {
            Distance::new(DistanceToken::XDays, round(wall_minutes / MINUTES_IN_DAY))
        }
    } else if wall_minutes < MINUTES_IN_YEAR {
        let months = round(wall_minutes / MINUTES_IN_MONTH);
        if months == 12 {
            Distance::new(DistanceToken::XYears, 1)
        } else {
            Distance::new(DistanceToken::XMonths, months)
        }
    } else {
        Distance::new(DistanceToken::XYears, round(wall_minutes / MINUTES_IN_YEAR))
    }
}

fn approximate(
    earlier: &DateTime<FixedOffset>,
    later: &DateTime<FixedOffset>,
    include_seconds: bool,
) -> Distance {
    let ms = (*later - *earlier).num_milliseconds();
    let seconds = ms / MS_PER_SECOND;
    let wall_seconds = (ms + offset_delta_ms(earlier, later)) / MS_PER_SECOND;
    let minutes = (wall_seconds as f64 / 60.0).round();

    if minutes < 2.0 {
        if include_seconds {
            return match seconds {
                s if s < 5 => Distance::new(DistanceToken::LessThanXSeconds, 5),
                s if s < 10 => Distance::new(DistanceToken::LessThanXSeconds, 10),
                s if s < 20 => Distance::new(DistanceToken::LessThanXSeconds, 20),
                s if s < 40 => Distance::new(DistanceToken::HalfAMinute, 30),
                s if s < 60 => Distance::new(DistanceToken::LessThanXMinutes, 1),
                _ => Distance::new(DistanceToken::XMinutes, 1),
            };
        }
        return if minutes == 0.0 {
            Distance::new(DistanceToken::LessThanXMinutes, 1)
        } else {
            Distance::new(DistanceToken::XMinutes, minutes as i64)
        };
    }

    if minutes < 45.0 {
        return Distance::new(DistanceToken::XMinutes, minutes as i64);
    }
    if minutes < 90.0 {
        return Distance::new(DistanceToken::AboutXHours, 1);
    }
    if minutes < MINUTES_IN_DAY {
        return Distance::new(DistanceToken::AboutXHours, (minutes / 60.0).round() as i64);
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return Distance::new(DistanceToken::XDays, 1);
    }
    if minutes < MINUTES_IN_MONTH {
        return Distance::new(DistanceToken::XDays, (minutes / MINUTES_IN_DAY).round() as i64);
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return Distance::new(
            DistanceToken::AboutXMonths,
            (minutes / MINUTES_IN_MONTH).round() as i64,
        );
    }

    let months = whole_months_between(earlier, later);
    if months < 12 {
        return Distance::new(
            DistanceToken::XMonths,
            (minutes / MINUTES_IN_MONTH).round() as i64,
        );
    }

    let years = months / 12;
    match months % 12 {
        m if m < 3 => Distance::new(DistanceToken::AboutXYears, years),
        m if m < 9 => Distance::new(DistanceToken::OverXYears, years),
        _ => Distance::new(DistanceToken::AlmostXYears, years + 1),
    }
}
