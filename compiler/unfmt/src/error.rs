//! Errors raised while compiling or applying a template.

use unfmt_ir::{FormatSpecError, TemplateError};
use unfmt_types::ConversionError;

/// A template could not be compiled.
///
/// Compilation errors never surface during matching; a compiled pattern
/// only fails through user conversions.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A closed placeholder with an invalid name.
    #[error(transparent)]
    Template(TemplateError),

    #[error("invalid format spec '{spec}' at offset {offset}: {source}")]
    Spec {
        spec: String,
        offset: usize,
        #[source]
        source: FormatSpecError,
    },

    #[error("unknown type code '{code}' at offset {offset}")]
    UnknownType { code: String, offset: usize },

    /// A named field repeats with a type producing another kind of value.
    #[error("field '{name}' is repeated with type '{second}' after type '{first}'")]
    RepeatedName {
        name: String,
        first: String,
        second: String,
    },

    /// The pattern needs more capture groups than allowed.
    #[error("template needs {groups} capture groups, the limit is {limit}")]
    TooManyFields { groups: usize, limit: usize },

    /// The matching engine rejected the generated pattern.
    #[error("invalid pattern: {message}")]
    Pattern { message: String },

    /// A custom type declared a group count its pattern does not have.
    #[error("pattern declares {declared} capture groups but has {actual}")]
    GroupCountMismatch { declared: usize, actual: usize },
}

impl From<TemplateError> for CompileError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Spec {
                spec,
                offset,
                source,
            } => CompileError::Spec {
                spec,
                offset,
                source,
            },
            other @ TemplateError::InvalidName { .. } => CompileError::Template(other),
        }
    }
}

/// Error from the one-shot functions, which compile and match in one call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
