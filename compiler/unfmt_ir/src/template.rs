//! Template tokenizer.
//!
//! Splits a template into literal runs and `{[name][:spec]}` placeholders.
//! Braces are escaped by doubling. An opening brace with no closing brace is
//! literal text, as is a lone closing brace.

use crate::field::{FieldDescriptor, FieldId, Segment};
use crate::format_spec::{parse_format_spec, FormatSpecError};

/// Error from tokenizing a template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A closed placeholder whose name is not a dotted identifier.
    #[error("invalid field name '{name}' at offset {offset}")]
    InvalidName { name: String, offset: usize },
    /// The spec after the colon does not parse.
    #[error("invalid format spec '{spec}' at offset {offset}: {source}")]
    Spec {
        spec: String,
        offset: usize,
        #[source]
        source: FormatSpecError,
    },
}

/// Tokenize a template into segments.
///
/// Anonymous fields (`{}`, `{:d}`, and numbered forms like `{0}`) are
/// numbered in order of appearance. Adjacent literal text is merged.
pub fn tokenize(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut fixed = 0usize;
    let mut rest = template.char_indices().peekable();

    while let Some((offset, c)) = rest.next() {
        match c {
            '{' if rest.peek().map(|&(_, next)| next) == Some('{') => {
                rest.next();
                literal.push('{');
            }
            '}' if rest.peek().map(|&(_, next)| next) == Some('}') => {
                rest.next();
                literal.push('}');
            }
            '{' => {
                let body_start = offset + 1;
                let Some(body) = field_body(&template[body_start..]) else {
                    literal.push('{');
                    continue;
                };
                let field = parse_field(body, offset, &mut fixed)?;

                // Skip the body and the closing brace.
                let end = body_start + body.len();
                while rest.next_if(|&(i, _)| i <= end).is_some() {}

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(field));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// The text between an opening brace and its closing brace, if the
/// placeholder is closed before another opening brace.
fn field_body(after_brace: &str) -> Option<&str> {
    let close = after_brace.find('}')?;
    let body = &after_brace[..close];
    if body.contains('{') {
        return None;
    }
    Some(body)
}

fn parse_field(
    body: &str,
    offset: usize,
    fixed: &mut usize,
) -> Result<FieldDescriptor, TemplateError> {
    let (name, raw_spec) = body.split_once(':').unwrap_or((body, ""));

    let spec = parse_format_spec(raw_spec).map_err(|source| TemplateError::Spec {
        spec: raw_spec.to_string(),
        offset,
        source,
    })?;

    let id = if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
        let id = FieldId::Fixed(*fixed);
        *fixed += 1;
        id
    } else if is_valid_name(name) {
        FieldId::Named(name.to_string())
    } else {
        return Err(TemplateError::InvalidName {
            name: name.to_string(),
            offset,
        });
    };

    Ok(FieldDescriptor {
        id,
        raw_spec: raw_spec.to_string(),
        spec,
        offset,
    })
}

/// A dotted identifier: non-empty segments of word characters, not
/// starting with a digit.
fn is_valid_name(name: &str) -> bool {
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_ok
        && name.split('.').all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
}
