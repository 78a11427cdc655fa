//! Builders for derived custom types: cardinality, enums and choices.
//!
//! Every builder returns an ordinary [`CustomType`], so the results are
//! registered in [`ExtraTypes`](crate::ExtraTypes) like any other type.

use crate::error::ConversionError;
use crate::registry::CustomType;
use crate::value::Value;

/// Separator between the items of a `many`/`many0` field.
const LIST_SEPARATOR: char = ',';

/// Constructors for derived types.
pub struct TypeBuilder;

impl TypeBuilder {
    /// `ty` or nothing. An empty match converts to [`Value::Empty`].
    pub fn optional(ty: &CustomType) -> CustomType {
        let inner = ty.clone();
        let pattern = format!("(?:{})?", item_pattern(ty));
        CustomType::new(move |text| {
            if text.is_empty() {
                Ok(Value::Empty)
            } else {
                inner.convert(text)
            }
        })
        .with_regex(pattern)
        .with_group_count(ty.group_count())
    }

    /// One or more comma-separated occurrences of `ty`, as a list.
    pub fn many(ty: &CustomType) -> CustomType {
        let item = item_pattern(ty);
        let pattern = format!(r"{item}(?:\s*{LIST_SEPARATOR}\s*{item})*");
        list_type(ty, pattern)
    }

    /// Zero or more comma-separated occurrences of `ty`, as a list.
    pub fn many0(ty: &CustomType) -> CustomType {
        let item = item_pattern(ty);
        let pattern = format!(r"(?:{item}(?:\s*{LIST_SEPARATOR}\s*{item})*)?");
        list_type(ty, pattern)
    }

    /// Names that map to values. Lookup tries the exact text first, then
    /// its lowercase form, so matching stays correct without the
    /// case-sensitive flag.
    pub fn make_enum<I, K, V>(mapping: I) -> CustomType
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mapping: Vec<(String, Value)> = mapping
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let pattern = alternation(mapping.iter().map(|(key, _)| key.as_str()));
        CustomType::new(move |text| {
            let lower = text.to_lowercase();
            mapping
                .iter()
                .find(|(key, _)| key == text)
                .or_else(|| mapping.iter().find(|(key, _)| *key == lower))
                .map(|(_, value)| value.clone())
                .ok_or_else(|| ConversionError::new(format!("'{text}' is not a known name")))
        })
        .with_regex(pattern)
    }

    /// A fixed set of words. Converts to the matching choice as written
    /// in `choices`, comparing without regard to case.
    pub fn make_choice<I, S>(choices: I) -> CustomType
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let pattern = alternation(choices.iter().map(String::as_str));
        CustomType::new(move |text| {
            choices
                .iter()
                .find(|choice| choice.as_str() == text)
                .or_else(|| choices.iter().find(|choice| choice.eq_ignore_ascii_case(text)))
                .map(|choice| Value::Str(choice.clone()))
                .ok_or_else(|| ConversionError::new(format!("'{text}' is not a valid choice")))
        })
        .with_regex(pattern)
    }
}

fn item_pattern(ty: &CustomType) -> String {
    format!("(?:{})", ty.pattern().unwrap_or(r"[^,]+?"))
}

fn list_type(ty: &CustomType, pattern: String) -> CustomType {
    let inner = ty.clone();
    // The item pattern appears twice, so its groups do too.
    let group_count = ty.group_count() * 2;
    CustomType::new(move |text| {
        if text.trim().is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        text.split(LIST_SEPARATOR)
            .map(|item| inner.convert(item.trim()))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    })
    .with_regex(pattern)
    .with_group_count(group_count)
}

/// Escaped alternation, longest names first so a name is never cut short
/// by one of its prefixes.
fn alternation<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = names.collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    let escaped: Vec<String> = names.into_iter().map(regex::escape).collect();
    escaped.join("|")
}

#[cfg(test)]
mod tests;
