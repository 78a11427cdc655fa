#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;
use regex::Regex;

use super::*;

fn number() -> CustomType {
    crate::with_pattern(r"\d+", 0, |text| {
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(ConversionError::from_error)
    })
}

fn matches_fully(ty: &CustomType, text: &str) -> bool {
    let pattern = ty.pattern().unwrap();
    Regex::new(&format!("^(?:{pattern})$"))
        .unwrap()
        .is_match(text)
}

#[test]
fn optional_accepts_nothing() {
    let ty = TypeBuilder::optional(&number());
    assert!(matches_fully(&ty, ""));
    assert!(matches_fully(&ty, "42"));
    assert_eq!(ty.convert("").unwrap(), Value::Empty);
    assert_eq!(ty.convert("42").unwrap(), Value::Int(42));
}

#[test]
fn many_needs_at_least_one() {
    let ty = TypeBuilder::many(&number());
    assert!(!matches_fully(&ty, ""));
    assert!(matches_fully(&ty, "1, 2,3"));
    assert_eq!(
        ty.convert("1, 2,3").unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn many0_accepts_empty_list() {
    let ty = TypeBuilder::many0(&number());
    assert!(matches_fully(&ty, ""));
    assert_eq!(ty.convert("").unwrap(), Value::List(vec![]));
}

#[test]
fn list_group_count_doubles() {
    let pair = crate::with_pattern(r"(\d)(\d)", 2, |text| Ok(Value::from(text)));
    assert_eq!(TypeBuilder::many(&pair).group_count(), 4);
    assert_eq!(TypeBuilder::optional(&pair).group_count(), 2);
}

#[test]
fn item_errors_propagate() {
    let ty = TypeBuilder::many(&number());
    assert!(ty.convert("1,x").is_err());
}

#[test]
fn enum_maps_names() {
    let ty = TypeBuilder::make_enum([("yes", true), ("no", false)]);
    assert!(matches_fully(&ty, "yes"));
    assert!(!matches_fully(&ty, "maybe"));
    assert_eq!(ty.convert("yes").unwrap(), Value::Bool(true));
    assert_eq!(ty.convert("NO").unwrap(), Value::Bool(false));
    assert!(ty.convert("maybe").is_err());
}

#[test]
fn enum_prefers_longest_name() {
    let ty = TypeBuilder::make_enum([("y", 1_i64), ("yes", 2_i64)]);
    let re = Regex::new(&format!("^({})", ty.pattern().unwrap())).unwrap();
    assert_eq!(&re.captures("yes").unwrap()[1], "yes");
}

#[test]
fn choice_returns_canonical_spelling() {
    let ty = TypeBuilder::make_choice(["red", "Green", "a.b"]);
    assert_eq!(ty.convert("GREEN").unwrap(), Value::from("Green"));
    assert_eq!(ty.convert("red").unwrap(), Value::from("red"));
    assert!(matches_fully(&ty, "a.b"));
    assert!(!matches_fully(&ty, "axb"));
    assert!(ty.convert("blue").is_err());
}
