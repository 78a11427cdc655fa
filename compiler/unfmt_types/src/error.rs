//! Conversion errors.

use std::error::Error;

/// Boxed source error carried by a [`ConversionError`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A conversion function rejected the text it was handed.
///
/// Built-in conversions never produce this: when a built-in converter
/// cannot turn matched text into a value the candidate is simply not a
/// match. User conversions return it to abort the whole parse, and the
/// caller receives it unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ConversionError {
    /// A conversion failure described by a message.
    pub fn new(message: impl Into<String>) -> Self {
        ConversionError {
            message: message.into(),
            source: None,
        }
    }

    /// A conversion failure caused by another error.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        ConversionError {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A type code that names neither a built-in type nor an extra type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown type code '{0}'")]
pub struct UnknownType(pub String);
