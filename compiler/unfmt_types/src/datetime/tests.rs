#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone};
use pretty_assertions::assert_eq;
use regex::Regex;

use super::*;

/// Match `text` against the style's fragment and convert the captures.
fn parse(style: DateStyle, text: &str) -> Option<Value> {
    let (pattern, groups) = style.fragment();
    let re = Regex::new(&format!("^(?s:{pattern})$")).unwrap();
    assert_eq!(re.captures_len() - 1, groups, "group count for {style:?}");
    let caps = re.captures(text)?;
    let internal: Vec<Option<&str>> = (1..=groups)
        .map(|i| caps.get(i).map(|m| m.as_str()))
        .collect();
    style.convert(&internal)
}

fn offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap()
}

fn at(
    tz: FixedOffset,
    (y, mo, d): (i32, u32, u32),
    (h, mi, s): (u32, u32, u32),
) -> DateTime<FixedOffset> {
    tz.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn datetime(style: DateStyle, text: &str) -> DateTime<FixedOffset> {
    match parse(style, text) {
        Some(Value::DateTime(dt)) => dt,
        other => panic!("{text}: expected a datetime, got {other:?}"),
    }
}

#[test]
fn codes_round_trip() {
    for style in DateStyle::ALL {
        assert_eq!(DateStyle::from_code(style.code()), Some(style));
    }
    assert_eq!(DateStyle::from_code("tx"), None);
}

#[test]
fn group_counts() {
    let counts: Vec<usize> = DateStyle::ALL.iter().map(|s| s.fragment().1).collect();
    assert_eq!(counts, vec![8, 7, 9, 9, 7, 8, 6, 6]);
}

// ISO 8601

#[test]
fn iso_date_only() {
    let dt = datetime(DateStyle::Iso, "1997-07-16");
    assert_eq!(dt, at(offset(0), (1997, 7, 16), (0, 0, 0)));
}

#[test]
fn iso_with_offset_and_fraction() {
    let dt = datetime(DateStyle::Iso, "1997-07-16T19:20:30.45+01:00");
    let expected = at(offset(3600), (1997, 7, 16), (19, 20, 30));
    assert_eq!(dt, expected + TimeDelta::milliseconds(450));
}

#[test]
fn iso_separators() {
    let expected = at(offset(0), (1997, 7, 16), (19, 20, 0));
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16T19:20"), expected);
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16 19:20"), expected);
    assert_eq!(datetime(DateStyle::Iso, "1997-07-1619:20"), expected);
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16T19:20Z"), expected);
}

#[test]
fn iso_offset_forms() {
    let expected = at(offset(3600), (1997, 7, 16), (19, 20, 0));
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16T19:20+01:00"), expected);
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16T19:20+0100"), expected);
    assert_eq!(datetime(DateStyle::Iso, "1997-07-16T19:20+1:00"), expected);
}

#[test]
fn iso_rejects_impossible_dates() {
    assert_eq!(parse(DateStyle::Iso, "1997-02-30"), None);
    assert_eq!(parse(DateStyle::Iso, "1997-13-01"), None);
    assert_eq!(parse(DateStyle::Iso, "1997-07-16T19:60"), None);
}

#[test]
fn fraction_truncates_to_nanoseconds() {
    let dt = datetime(DateStyle::Iso, "2000-01-01T00:00:00.1234567891");
    assert_eq!(dt.timestamp_subsec_nanos(), 123_456_789);
}

#[test]
fn non_ascii_digits_do_not_match() {
    let arabic_fraction = "2011-02-01T10:00:00.\u{661}\u{661}\u{661}\u{661}\u{661}";
    assert_eq!(parse(DateStyle::Iso, arabic_fraction), None);
    let arabic_year = "\u{662}\u{660}\u{661}\u{661}-02-01";
    assert_eq!(parse(DateStyle::Iso, arabic_year), None);
    assert_eq!(parse(DateStyle::Time, "\u{661}\u{660}:21"), None);
}

#[test]
fn fraction_digits_must_be_ascii() {
    assert_eq!(fraction_nanos("\u{661}\u{661}\u{661}\u{661}\u{661}"), None);
    assert_eq!(fraction_nanos("5"), Some(500_000_000));
    assert_eq!(fraction_nanos("000000001"), Some(1));
}

// RFC 2822

#[test]
fn email_with_weekday() {
    let dt = datetime(DateStyle::Email, "Mon, 21 Nov 2011 10:21:36 +1000");
    assert_eq!(dt, at(offset(36000), (2011, 11, 21), (10, 21, 36)));
}

#[test]
fn email_without_weekday_or_seconds() {
    let dt = datetime(DateStyle::Email, "21 Nov 2011 10:21 -0530");
    assert_eq!(dt, at(offset(-19800), (2011, 11, 21), (10, 21, 0)));
}

#[test]
fn email_requires_offset() {
    assert_eq!(parse(DateStyle::Email, "21 Nov 2011 10:21:36"), None);
}

// Day-first and month-first

#[test]
fn global_numeric_and_named_months() {
    let expected = at(offset(0), (2011, 11, 21), (0, 0, 0));
    assert_eq!(datetime(DateStyle::Global, "21/11/2011"), expected);
    assert_eq!(datetime(DateStyle::Global, "21-11-2011"), expected);
    assert_eq!(datetime(DateStyle::Global, "21-Nov-2011"), expected);
    assert_eq!(datetime(DateStyle::Global, "21-NOVEMBER-2011"), expected);
    assert_eq!(datetime(DateStyle::Global, "21/nov/2011"), expected);
}

#[test]
fn global_with_meridiem_and_offset() {
    let dt = datetime(DateStyle::Global, "21/11/2011 10:21:36 PM +1000");
    assert_eq!(dt, at(offset(36000), (2011, 11, 21), (22, 21, 36)));
    let dt = datetime(DateStyle::Global, "21/11/2011 10:21:36 am");
    assert_eq!(dt, at(offset(0), (2011, 11, 21), (10, 21, 36)));
}

#[test]
fn american_swaps_day_and_month() {
    let expected = at(offset(0), (2011, 11, 21), (10, 21, 36));
    for text in ["11/21/2011 10:21:36", "Nov-21-2011 10:21:36"] {
        assert_eq!(datetime(DateStyle::American, text), expected, "{text}");
    }
    let march = at(offset(0), (2011, 3, 1), (0, 0, 0));
    assert_eq!(datetime(DateStyle::American, "March-1-2011"), march);
    assert_eq!(parse(DateStyle::American, "21/11/2011"), None);
}

#[test]
fn pm_carries_into_next_day() {
    let dt = datetime(DateStyle::Global, "21/11/2011 13:00 PM");
    assert_eq!(dt, at(offset(0), (2011, 11, 22), (1, 0, 0)));
}

// ctime and log formats

#[test]
fn ctime() {
    let dt = datetime(DateStyle::Ctime, "Sun Sep 16 01:03:52 1973");
    assert_eq!(dt, at(offset(0), (1973, 9, 16), (1, 3, 52)));
    let dt = datetime(DateStyle::Ctime, "Sun Sep  6 01:03:52 1973");
    assert_eq!(dt, at(offset(0), (1973, 9, 6), (1, 3, 52)));
}

#[test]
fn http_log() {
    let dt = datetime(DateStyle::Http, "21/Nov/2011:00:07:11 +0000");
    assert_eq!(dt, at(offset(0), (2011, 11, 21), (0, 7, 11)));
    let dt = datetime(DateStyle::Http, "21-Nov-2011:10:21:36 +1000");
    assert_eq!(dt, at(offset(36000), (2011, 11, 21), (10, 21, 36)));
}

#[test]
fn syslog_uses_the_current_year() {
    let year = Local::now().year();
    let dt = datetime(DateStyle::Syslog, "Nov 21 10:21:36");
    assert_eq!(dt, at(offset(0), (year, 11, 21), (10, 21, 36)));
    let dt = datetime(DateStyle::Syslog, "Nov  1 03:21:36");
    assert_eq!(dt, at(offset(0), (year, 11, 1), (3, 21, 36)));
}

// Time of day

#[test]
fn time_with_meridiem_and_offset() {
    let value = parse(DateStyle::Time, "10:21:36 PM -5:30").unwrap();
    assert_eq!(
        value,
        Value::Time(ClockTime::new(
            NaiveTime::from_hms_opt(22, 21, 36).unwrap(),
            offset(-19800),
        ))
    );
}

#[test]
fn time_defaults_to_utc() {
    let value = parse(DateStyle::Time, "10:21").unwrap();
    let time = value.as_time().unwrap();
    assert_eq!(time.time, NaiveTime::from_hms_opt(10, 21, 0).unwrap());
    assert_eq!(time.offset, offset(0));
}

#[test]
fn time_wraps_past_midnight() {
    let value = parse(DateStyle::Time, "12:30 PM").unwrap();
    let expected = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
    assert_eq!(value.as_time().unwrap().time, expected);
}

// Helpers

#[test]
fn offsets() {
    assert_eq!(parse_offset("Z"), Some(offset(0)));
    assert_eq!(parse_offset("+1000"), Some(offset(36000)));
    assert_eq!(parse_offset("-05:30"), Some(offset(-19800)));
    assert_eq!(parse_offset("+100"), Some(offset(3600)));
    assert_eq!(parse_offset("+0160"), None);
    assert_eq!(parse_offset("0100"), None);
}

#[test]
fn offsets_with_seconds_or_bare_hours() {
    assert_eq!(parse_offset("+00:00:00"), Some(offset(0)));
    assert_eq!(parse_offset("-01:30:15"), Some(offset(-5415)));
    assert_eq!(parse_offset("+013015"), Some(offset(5415)));
    assert_eq!(parse_offset("+02"), Some(offset(7200)));
    assert_eq!(parse_offset("+01:00:60"), None);
    assert_eq!(parse_offset("+01:00:00:00"), None);
    assert_eq!(parse_offset("+999999:00"), None);
    assert_eq!(parse_offset("+"), None);
}

#[test]
fn month_names() {
    assert_eq!(month_number("Jan"), Some(1));
    assert_eq!(month_number("SEPTEMBER"), Some(9));
    assert_eq!(month_number("xyz"), None);
    assert_eq!(month_number("de"), None);
}
