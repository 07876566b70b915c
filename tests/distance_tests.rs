use chrono::{DateTime, FixedOffset, TimeZone};

use agolabel::display::distance::{Distance, select};
use agolabel::display::{DistanceOptions, DistanceStyle};
use agolabel::locale::DistanceToken;

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
}

fn approximate() -> DistanceOptions {
    DistanceOptions {
        style: DistanceStyle::Approximate,
        ..DistanceOptions::default()
    }
}

#[test]
fn test_select_is_order_independent() {
    let a = utc(2024, 3, 14, 17);
    let b = utc(2024, 3, 14, 20);
    let options = DistanceOptions::default();
    assert_eq!(select(&a, &b, &options), select(&b, &a, &options));
    assert_eq!(
        select(&a, &b, &options),
        Distance {
            token: DistanceToken::XHours,
            count: 3
        }
    );
}

#[test]
fn test_about_years() {
    let d = select(&utc(2022, 2, 14, 17), &utc(2024, 3, 14, 17), &approximate());
    assert_eq!(d.token, DistanceToken::AboutXYears);
    assert_eq!(d.count, 2);
}

#[test]
fn test_over_years() {
    let d = select(&utc(2022, 9, 14, 17), &utc(2024, 3, 14, 17), &approximate());
    assert_eq!(d.token, DistanceToken::OverXYears);
    assert_eq!(d.count, 1);
}

#[test]
fn test_almost_years() {
    let d = select(&utc(2022, 4, 14, 17), &utc(2024, 3, 14, 17), &approximate());
    assert_eq!(d.token, DistanceToken::AlmostXYears);
    assert_eq!(d.count, 2);
}

#[test]
fn test_calendar_months_below_a_year() {
    let d = select(&utc(2023, 10, 14, 17), &utc(2024, 3, 14, 17), &approximate());
    assert_eq!(d.token, DistanceToken::XMonths);
    assert_eq!(d.count, 5);
}

#[test]
fn test_day_count_follows_wall_clock_across_offset_change() {
    // 09:00 at UTC+1 to 09:00 at UTC+2, five calendar days apart
    let before = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 28, 9, 0, 0)
        .unwrap();
    let after = FixedOffset::east_opt(7200)
        .unwrap()
        .with_ymd_and_hms(2024, 4, 2, 9, 0, 0)
        .unwrap();
    let options = DistanceOptions {
        rounding: agolabel::display::RoundingMethod::Floor,
        ..DistanceOptions::default()
    };
    let d = select(&before, &after, &options);
    assert_eq!(d.token, DistanceToken::XDays);
    assert_eq!(d.count, 5);
}
