//! Unfmt IR - template front end for the unfmt matcher compiler.
//!
//! This crate turns a template such as `"{name} is {age:>3d}"` into an
//! ordered list of [`Segment`]s:
//! - literal runs, with `{{`/`}}` escapes resolved
//! - [`FieldDescriptor`]s carrying the field identity and parsed [`FormatSpec`]
//!
//! Nothing here knows which type codes exist; resolving codes to matchers
//! and converters happens in `unfmt_types` and `unfmt`.

mod field;
mod format_spec;
mod template;

pub use field::{FieldDescriptor, FieldId, Segment};
pub use format_spec::{parse_format_spec, Align, FormatSpec, FormatSpecError, Sign};
pub use template::{tokenize, TemplateError};
