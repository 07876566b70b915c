use chrono::{DateTime, TimeZone, Utc};

use agolabel::Error;
use agolabel::display::DatePattern;

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 17, 5, 9).unwrap()
}

fn fmt(pattern: &str) -> String {
    DatePattern::compile(pattern).unwrap().format(&at())
}

#[test]
fn test_default_patterns() {
    assert_eq!(fmt("MM/dd/yy"), "03/14/24");
    assert_eq!(fmt("h:mm a"), "5:05 PM");
}

#[test]
fn test_numeric_fields() {
    assert_eq!(fmt("yyyy-MM-dd HH:mm:ss"), "2024-03-14 17:05:09");
    assert_eq!(fmt("M/d/y"), "3/14/2024");
    assert_eq!(fmt("H:m:s"), "17:5:9");
    assert_eq!(fmt("hh"), "05");
}

#[test]
fn test_text_fields() {
    assert_eq!(fmt("EEEE, MMMM d"), "Thursday, March 14");
    assert_eq!(fmt("EEE d MMM"), "Thu 14 Mar");
}

#[test]
fn test_quoted_literals() {
    assert_eq!(fmt("yyyy-MM-dd'T'HH:mm"), "2024-03-14T17:05");
    assert_eq!(fmt("'at' h a"), "at 5 PM");
    assert_eq!(fmt("h''mm"), "5'05");
    assert_eq!(fmt("'it''s' h"), "it's 5");
}

#[test]
fn test_percent_is_literal() {
    assert_eq!(fmt("100% dd"), "100% 14");
}

#[test]
fn test_unsupported_field_is_rejected() {
    let err = DatePattern::compile("MM/dd/yy Q").unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
    assert!(err.to_string().contains("\"Q\""));
}

#[test]
fn test_unterminated_quote_is_rejected() {
    assert!(DatePattern::compile("'at h").is_err());
}

#[test]
fn test_source_is_kept() {
    let pattern = DatePattern::compile("MM/dd/yy").unwrap();
    assert_eq!(pattern.as_str(), "MM/dd/yy");
    assert_eq!(pattern.to_string(), "MM/dd/yy");
}
