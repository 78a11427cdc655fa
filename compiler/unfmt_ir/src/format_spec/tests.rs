//! Tests for the format specification parser.

#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;

use super::*;

// Empty spec

#[test]
fn empty_spec() {
    let spec = parse_format_spec("").unwrap();
    assert_eq!(spec, FormatSpec::EMPTY);
}

// Alignment

#[test]
fn align_left() {
    let spec = parse_format_spec("<").unwrap();
    assert_eq!(spec.align, Some(Align::Left));
    assert_eq!(spec.fill, None);
}

#[test]
fn align_right() {
    let spec = parse_format_spec(">").unwrap();
    assert_eq!(spec.align, Some(Align::Right));
}

#[test]
fn align_center() {
    let spec = parse_format_spec("^").unwrap();
    assert_eq!(spec.align, Some(Align::Center));
}

#[test]
fn align_sign_aware() {
    let spec = parse_format_spec("=d").unwrap();
    assert_eq!(spec.align, Some(Align::ZeroPad));
    assert_eq!(spec.fill_char(), '0');
    assert_eq!(spec.type_code.as_deref(), Some("d"));
}

#[test]
fn fill_and_align() {
    let spec = parse_format_spec(".^").unwrap();
    assert_eq!(spec.fill, Some('.'));
    assert_eq!(spec.align, Some(Align::Center));
}

#[test]
fn fill_and_sign_aware_align() {
    let spec = parse_format_spec("x=5d").unwrap();
    assert_eq!(spec.fill, Some('x'));
    assert_eq!(spec.align, Some(Align::ZeroPad));
    assert_eq!(spec.width, Some(5));
    assert_eq!(spec.type_code.as_deref(), Some("d"));
}

#[test]
fn fill_may_be_an_align_char() {
    let spec = parse_format_spec("<<").unwrap();
    assert_eq!(spec.fill, Some('<'));
    assert_eq!(spec.align, Some(Align::Left));
}

// Sign

#[test]
fn sign_variants() {
    assert_eq!(parse_format_spec("+").unwrap().sign, Some(Sign::Plus));
    assert_eq!(parse_format_spec("-").unwrap().sign, Some(Sign::Minus));
    assert_eq!(parse_format_spec(" ").unwrap().sign, Some(Sign::Space));
}

#[test]
fn sign_before_precision_and_type() {
    let spec = parse_format_spec("+.7f").unwrap();
    assert_eq!(spec.sign, Some(Sign::Plus));
    assert_eq!(spec.precision, Some(7));
    assert_eq!(spec.type_code.as_deref(), Some("f"));
}

// Flags

#[test]
fn alternate_form() {
    let spec = parse_format_spec("#x").unwrap();
    assert!(spec.alternate);
    assert_eq!(spec.type_code.as_deref(), Some("x"));
}

#[test]
fn zero_pad_with_width() {
    let spec = parse_format_spec("05d").unwrap();
    assert!(spec.zero_pad);
    assert_eq!(spec.width, Some(5));
    assert_eq!(spec.fill_char(), '0');
}

#[test]
fn zero_pad_alone() {
    let spec = parse_format_spec("0").unwrap();
    assert!(spec.zero_pad);
    assert_eq!(spec.width, None);
}

#[test]
fn grouping_flag() {
    let spec = parse_format_spec("10,d").unwrap();
    assert!(spec.grouping);
    assert_eq!(spec.width, Some(10));
    assert_eq!(spec.type_code.as_deref(), Some("d"));
}

// Width and precision

#[test]
fn width_and_precision() {
    let spec = parse_format_spec("10.2f").unwrap();
    assert_eq!(spec.width, Some(10));
    assert_eq!(spec.precision, Some(2));
}

#[test]
fn bare_dot_means_zero_precision() {
    let spec = parse_format_spec(".").unwrap();
    assert_eq!(spec.precision, Some(0));
}

#[test]
fn width_overflow_is_an_error() {
    let err = parse_format_spec("99999999999999999999999").unwrap_err();
    assert!(matches!(err, FormatSpecError::InvalidWidth(_)));
}

// Type codes

#[test]
fn every_builtin_code_is_a_type() {
    for code in [
        "%", "o", "b", "x", "e", "g", "f", "d", "D", "w", "W", "s", "S", "n", "l",
    ] {
        let spec = parse_format_spec(code).unwrap();
        assert_eq!(spec.type_code.as_deref(), Some(code));

        let spec = parse_format_spec(&format!("10{code}")).unwrap();
        assert_eq!(spec.width, Some(10));
        assert_eq!(spec.type_code.as_deref(), Some(code));
    }
}

#[test]
fn multi_char_type_code() {
    let spec = parse_format_spec("ti").unwrap();
    assert_eq!(spec.type_code.as_deref(), Some("ti"));
    let spec = parse_format_spec("Number").unwrap();
    assert_eq!(spec.type_code.as_deref(), Some("Number"));
}

#[test]
fn kitchen_sink() {
    let spec = parse_format_spec(".^010d").unwrap();
    assert_eq!(
        spec,
        FormatSpec {
            fill: Some('.'),
            align: Some(Align::Center),
            sign: None,
            alternate: false,
            zero_pad: true,
            width: Some(10),
            grouping: false,
            precision: None,
            type_code: Some("d".to_string()),
        }
    );
}

#[test]
fn type_code_with_whitespace_is_rejected() {
    let err = parse_format_spec("d d").unwrap_err();
    assert_eq!(err, FormatSpecError::InvalidTypeCode("d d".to_string()));
}

#[test]
fn strftime_code_may_hold_spaces_and_colons() {
    let spec = parse_format_spec("%Y-%m-%d %H:%M:%S").unwrap();
    assert_eq!(spec.type_code.as_deref(), Some("%Y-%m-%d %H:%M:%S"));
    assert_eq!(spec.width, None);

    let spec = parse_format_spec(">%H:%M").unwrap();
    assert_eq!(spec.align, Some(Align::Right));
    assert_eq!(spec.type_code.as_deref(), Some("%H:%M"));
}

// Padding defaults

#[test]
fn width_without_align_pads_on_the_left() {
    let spec = parse_format_spec("5d").unwrap();
    assert_eq!(spec.padding(), Some(Align::Right));
    assert_eq!(spec.fill_char(), ' ');
}

#[test]
fn no_width_no_padding() {
    let spec = parse_format_spec("d").unwrap();
    assert_eq!(spec.padding(), None);
}
