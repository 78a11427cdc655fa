//! Unfmt Types - typed values and the type registry.
//!
//! This crate decides what a field's type code means:
//! - [`lookup`] resolves a code against caller [`ExtraTypes`] and the
//!   [`BuiltinType`] table
//! - each resolved type yields a regex [`Fragment`] and converts matched
//!   text into a [`Value`]
//! - the `t*` codes ([`DateStyle`]) and strftime-style codes
//!   ([`StrftimeFormat`]) are handled by the datetime sub-parser
//!
//! # Failure model
//!
//! Built-in conversions return `None` to reject a candidate match. Only
//! user conversions fail with [`ConversionError`], which callers see
//! unchanged.

mod builder;
mod datetime;
mod error;
mod numeric;
mod registry;
mod value;

pub use builder::TypeBuilder;
pub use datetime::{DateStyle, StrftimeFormat};
pub use error::{BoxError, ConversionError, UnknownType};
pub use registry::{
    lookup, with_pattern, BuiltinType, ConvertFn, CustomType, ExtraTypes, Fragment, ResolvedType,
};
pub use value::{ClockTime, Value};
