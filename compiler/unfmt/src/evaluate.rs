//! Result evaluation: raw capture spans to typed values.

use std::borrow::Cow;
use std::ops::Index;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use unfmt_ir::{Align, FieldId};
use unfmt_types::{ConversionError, Value};

use crate::compiler::FieldPlan;
use crate::engine::{RawMatch, Span};

/// Key of a field in a [`Parsed`] result: position among anonymous fields,
/// or name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Index(usize),
    Name(String),
}

impl From<usize> for FieldKey {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name)
    }
}

/// The typed result of one successful match.
///
/// Anonymous fields are in template order; named fields are keyed by
/// name, and a repeated name holds its last occurrence. The compiler
/// only lets a name repeat with codes producing the same kind of value.
/// Spans exclude alignment padding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parsed {
    fixed: Vec<Value>,
    named: FxHashMap<String, Value>,
    spans: FxHashMap<FieldKey, Span>,
}

impl Parsed {
    pub fn fixed(&self) -> &[Value] {
        &self.fixed
    }

    pub fn named(&self) -> &FxHashMap<String, Value> {
        &self.named
    }

    pub fn spans(&self) -> &FxHashMap<FieldKey, Span> {
        &self.spans
    }

    /// Value of the field at `key`.
    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&Value> {
        match key.into() {
            FieldKey::Index(index) => self.fixed.get(index),
            FieldKey::Name(name) => self.named.get(&name),
        }
    }

    /// Whether a named field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Span of the field at `key` in the input text.
    pub fn span(&self, key: impl Into<FieldKey>) -> Option<Span> {
        self.spans.get(&key.into()).copied()
    }

    pub fn into_parts(self) -> (Vec<Value>, FxHashMap<String, Value>) {
        (self.fixed, self.named)
    }
}

impl Index<usize> for Parsed {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.fixed[index]
    }
}

impl Index<&str> for Parsed {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        &self.named[name]
    }
}

/// Convert every field of a raw match.
///
/// `Ok(None)` when a built-in conversion rejects its text. A user
/// conversion error aborts evaluation.
pub(crate) fn evaluate(
    text: &str,
    raw: &RawMatch,
    fields: &[FieldPlan],
) -> Result<Option<Parsed>, ConversionError> {
    let mut parsed = Parsed::default();

    for field in fields {
        let Some(captured) = raw.group(field.slot) else {
            continue;
        };
        let span = trim_fill(text, captured, field);
        let Some(value_text) = text.get(span.start..span.end) else {
            return Ok(None);
        };
        let value_text = strip_sign_fill(value_text, field.sign_fill);

        let internal: SmallVec<[Option<&str>; 10]> = (1..=field.internal)
            .map(|i| {
                raw.group(field.slot + i)
                    .and_then(|group| text.get(group.start..group.end))
            })
            .collect();

        let Some(value) = field.ty.convert(&value_text, &internal)? else {
            tracing::trace!(field = %field.id, text = %value_text, "conversion rejected");
            return Ok(None);
        };

        match &field.id {
            FieldId::Fixed(index) => {
                parsed.fixed.push(value);
                parsed.spans.insert(FieldKey::Index(*index), span);
            }
            FieldId::Named(name) => {
                parsed.named.insert(name.clone(), value);
                parsed.spans.insert(FieldKey::Name(name.clone()), span);
            }
        }
    }

    Ok(Some(parsed))
}

/// Center alignment strips fill from both ends of the value, even where
/// the pattern could not exclude it. Digit fills are left alone since
/// they cannot be told apart from the value, and a value made only of fill
/// is kept whole.
fn trim_fill(text: &str, span: Span, field: &FieldPlan) -> Span {
    let fill = field.fill;
    if field.padding != Some(Align::Center) || fill.is_ascii_digit() {
        return span;
    }
    let Some(captured) = text.get(span.start..span.end) else {
        return span;
    };
    let trimmed = captured.trim_matches(fill);
    if trimmed.is_empty() {
        return span;
    }
    let start = span.start + (captured.len() - captured.trim_start_matches(fill).len());
    Span::new(start, start + trimmed.len())
}

/// Remove `=` padding between the sign and the digits. Digit fills are
/// kept since leading zeros convert correctly.
fn strip_sign_fill(text: &str, fill: Option<char>) -> Cow<'_, str> {
    let Some(fill) = fill.filter(|c| !c.is_ascii_digit()) else {
        return Cow::Borrowed(text);
    };
    let (sign, digits) = match text.chars().next() {
        Some(c @ ('+' | '-' | ' ')) if c != fill => text.split_at(c.len_utf8()),
        _ => ("", text),
    };
    let stripped = digits.trim_start_matches(fill);
    if stripped.len() == digits.len() || stripped.is_empty() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{sign}{stripped}"))
    }
}
