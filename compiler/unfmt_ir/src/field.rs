//! Field descriptors produced by the template tokenizer.

use std::fmt;

use crate::FormatSpec;

/// Identity of a template field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldId {
    /// Anonymous field, numbered by its position among anonymous fields.
    Fixed(usize),
    /// Named field. Dots are kept verbatim; `a.b` is one opaque name.
    Named(String),
}

impl FieldId {
    /// The field name, if the field is named.
    pub fn name(&self) -> Option<&str> {
        match self {
            FieldId::Fixed(_) => None,
            FieldId::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Fixed(index) => write!(f, "{{{index}}}"),
            FieldId::Named(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// One placeholder of a template, with its parsed format spec.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub id: FieldId,
    /// The spec text after the colon, as written.
    pub raw_spec: String,
    pub spec: FormatSpec,
    /// Byte offset of the opening brace in the template.
    pub offset: usize,
}

impl FieldDescriptor {
    /// The type code, if one was given.
    pub fn type_code(&self) -> Option<&str> {
        self.spec.type_code.as_deref()
    }
}

/// A template split into literal runs and fields, in template order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Literal text with `{{`/`}}` escapes already resolved.
    Literal(String),
    Field(FieldDescriptor),
}
