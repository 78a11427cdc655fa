use pretty_assertions::assert_eq;

use super::*;

#[test]
fn decimal_integers() {
    assert_eq!(parse_int("42", 10), Some(42));
    assert_eq!(parse_int("-42", 10), Some(-42));
    assert_eq!(parse_int("+42", 10), Some(42));
    assert_eq!(parse_int(" 42", 10), Some(42));
    assert_eq!(parse_int("007", 10), Some(7));
}

#[test]
fn decimal_code_follows_prefix() {
    assert_eq!(parse_int("0b1000", 10), Some(8));
    assert_eq!(parse_int("0o1000", 10), Some(512));
    assert_eq!(parse_int("0x1000", 10), Some(4096));
    assert_eq!(parse_int("0XfF", 10), Some(255));
    assert_eq!(parse_int("-0x10", 10), Some(-16));
}

#[test]
fn radix_codes_strip_only_their_prefix() {
    assert_eq!(parse_int("0b1000", 2), Some(8));
    assert_eq!(parse_int("1000", 2), Some(8));
    assert_eq!(parse_int("0o1000", 8), Some(512));
    assert_eq!(parse_int("0x1000", 16), Some(4096));
    assert_eq!(parse_int("0B1", 16), Some(0xB1));
}

#[test]
fn bad_digits_and_overflow_reject() {
    assert_eq!(parse_int("", 10), None);
    assert_eq!(parse_int("0x", 10), None);
    assert_eq!(parse_int("12a", 10), None);
    assert_eq!(parse_int("99999999999999999999", 10), None);
    assert_eq!(parse_int("--1", 10), None);
    assert_eq!(parse_int("9223372036854775808", 10), None);
}

#[test]
fn full_i64_range() {
    assert_eq!(parse_int("-9223372036854775808", 10), Some(i64::MIN));
    assert_eq!(parse_int("9223372036854775807", 10), Some(i64::MAX));
    assert_eq!(parse_int("-0x8000000000000000", 10), Some(i64::MIN));
}

#[test]
fn grouped_integers() {
    assert_eq!(parse_grouped("1,000"), Some(1000));
    assert_eq!(parse_grouped("1.000.000"), Some(1_000_000));
    assert_eq!(parse_grouped("-1,234"), Some(-1234));
    assert_eq!(parse_grouped("100"), Some(100));
    assert_eq!(parse_grouped(","), None);
}

#[test]
fn floats() {
    assert_eq!(parse_float(".121"), Some(0.121));
    assert_eq!(parse_float("-1.5"), Some(-1.5));
    assert_eq!(parse_float("1.0e10"), Some(1.0e10));
    assert_eq!(parse_float("1e-3"), Some(1e-3));
    assert_eq!(parse_float("INF"), Some(f64::INFINITY));
    assert_eq!(parse_float("-inf"), Some(f64::NEG_INFINITY));
    assert!(parse_float("NaN").is_some_and(f64::is_nan));
    assert_eq!(parse_float("x"), None);
}

#[test]
fn percentages() {
    assert_eq!(parse_percent("50%"), Some(0.5));
    assert_eq!(parse_percent("12.5%"), Some(0.125));
    assert_eq!(parse_percent("50"), None);
}
