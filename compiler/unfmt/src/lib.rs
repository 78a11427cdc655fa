//! Unfmt - compile format templates into matchers.
//!
//! A template such as `"{name} is {age:d} years old"` is the dual of a
//! formatting template: instead of filling the placeholders, a
//! [`CompiledPattern`] recovers typed values from text that could have
//! been produced by filling them.
//!
//! # Architecture
//!
//! ```text
//! template ──► unfmt_ir::tokenize ──► compiler::generate ──► Engine::compile
//!                                        │ (type registry,
//!                                        │  datetime grammars)
//! text ──► Matcher ──► RawMatch ──► evaluate ──► Parsed
//! ```
//!
//! - `compiler` turns field descriptors into one regex and a plan per field
//! - `engine` is the seam to the regex implementation
//! - `evaluate` strips residual padding and converts captures to values
//!
//! # Example
//!
//! ```ignore
//! let parsed = unfmt::parse("{greeting} {name}", "hello world")?.unwrap();
//! assert_eq!(parsed["name"], Value::from("world"));
//! ```

mod compiler;
mod engine;
mod error;
mod evaluate;
mod options;
mod pattern;

use std::sync::Once;

pub use engine::{Engine, EngineError, Matcher, RawMatch, RegexEngine, Span};
pub use error::{CompileError, Error};
pub use evaluate::{FieldKey, Parsed};
pub use options::{CompileOptions, DEFAULT_MAX_GROUPS};
pub use pattern::{CompiledPattern, FindAll, Match};
pub use unfmt_ir::{parse_format_spec, Align, FieldId, FormatSpec, FormatSpecError, Sign};
pub use unfmt_types::{
    with_pattern, ClockTime, ConversionError, CustomType, DateStyle, ExtraTypes, StrftimeFormat,
    TypeBuilder, Value,
};

/// Compile a template with default options.
pub fn compile(template: &str) -> Result<CompiledPattern, CompileError> {
    CompiledPattern::new(template)
}

/// Compile `template` and match it against the whole of `text`.
pub fn parse(template: &str, text: &str) -> Result<Option<Parsed>, Error> {
    parse_with(
        template,
        text,
        &ExtraTypes::new(),
        &CompileOptions::default(),
    )
}

pub fn parse_with(
    template: &str,
    text: &str,
    extra: &ExtraTypes,
    options: &CompileOptions,
) -> Result<Option<Parsed>, Error> {
    let pattern = CompiledPattern::with_options(template, extra, options)?;
    Ok(pattern.parse(text)?)
}

/// Compile `template` and find its first occurrence in `text`.
pub fn search(template: &str, text: &str) -> Result<Option<Parsed>, Error> {
    search_with(
        template,
        text,
        &ExtraTypes::new(),
        &CompileOptions::default(),
    )
}

pub fn search_with(
    template: &str,
    text: &str,
    extra: &ExtraTypes,
    options: &CompileOptions,
) -> Result<Option<Parsed>, Error> {
    let pattern = CompiledPattern::with_options(template, extra, options)?;
    Ok(pattern.search(text)?)
}

/// Compile `template` and collect every occurrence in `text`.
///
/// The iterator form is [`CompiledPattern::find_all`].
pub fn find_all(template: &str, text: &str) -> Result<Vec<Parsed>, Error> {
    find_all_with(
        template,
        text,
        &ExtraTypes::new(),
        &CompileOptions::default(),
    )
}

pub fn find_all_with(
    template: &str,
    text: &str,
    extra: &ExtraTypes,
    options: &CompileOptions,
) -> Result<Vec<Parsed>, Error> {
    let pattern = CompiledPattern::with_options(template, extra, options)?;
    let found = pattern.find_all(text).collect::<Result<Vec<_>, _>>()?;
    Ok(found)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=unfmt=debug` to log generated patterns or `RUST_LOG=unfmt=trace`
/// to also log rejected conversions.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
