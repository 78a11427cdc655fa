//! Type registry: resolves a field's type code to a matcher fragment and
//! a converter.
//!
//! Built-in codes form the closed [`BuiltinType`] enum. Callers extend the
//! set through [`ExtraTypes`], a table of [`CustomType`]s keyed by code that
//! is consulted before the built-ins, so an extra type may shadow one.
//! Resolution happens once per field at compile time; matching only ever
//! dispatches on the resolved [`ResolvedType`].

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::datetime::{DateStyle, StrftimeFormat};
use crate::error::{ConversionError, UnknownType};
use crate::numeric;
use crate::value::Value;

/// Pattern for fields without a type code: the shortest non-empty run
/// that lets the rest of the template match.
const ANY_PATTERN: &str = ".+?";

/// A user conversion function.
pub type ConvertFn = dyn Fn(&str) -> Result<Value, ConversionError> + Send + Sync;

/// A caller-supplied type: a conversion function plus the pattern it
/// matches.
///
/// Without a pattern the field matches like an untyped field. A pattern
/// that contains capturing groups must declare them with
/// [`with_group_count`](Self::with_group_count) so the compiler can number
/// the groups that follow it.
#[derive(Clone)]
pub struct CustomType {
    convert: Arc<ConvertFn>,
    pattern: Option<String>,
    group_count: usize,
}

impl CustomType {
    pub fn new<F>(convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        CustomType {
            convert: Arc::new(convert),
            pattern: None,
            group_count: 0,
        }
    }

    /// Match this regex fragment instead of the untyped default.
    #[must_use]
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Declare how many capturing groups the pattern contains.
    #[must_use]
    pub fn with_group_count(mut self, group_count: usize) -> Self {
        self.group_count = group_count;
        self
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn convert(&self, text: &str) -> Result<Value, ConversionError> {
        (self.convert)(text)
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("pattern", &self.pattern)
            .field("group_count", &self.group_count)
            .finish_non_exhaustive()
    }
}

/// Attach a pattern and its group count to a conversion function.
///
/// ```ignore
/// let number = with_pattern(r"\d+", 0, |text| {
///     text.parse::<i64>().map(Value::Int).map_err(ConversionError::from_error)
/// });
/// ```
pub fn with_pattern<F>(pattern: impl Into<String>, group_count: usize, convert: F) -> CustomType
where
    F: Fn(&str) -> Result<Value, ConversionError> + Send + Sync + 'static,
{
    CustomType::new(convert)
        .with_regex(pattern)
        .with_group_count(group_count)
}

/// Caller-supplied types, keyed by type code.
#[derive(Clone, Debug, Default)]
pub struct ExtraTypes {
    types: FxHashMap<String, CustomType>,
}

impl ExtraTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, ty: CustomType) -> Self {
        self.insert(code, ty);
        self
    }

    /// Register a type, returning the one it replaces.
    pub fn insert(&mut self, code: impl Into<String>, ty: CustomType) -> Option<CustomType> {
        self.types.insert(code.into(), ty)
    }

    pub fn get(&self, code: &str) -> Option<&CustomType> {
        self.types.get(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CustomType)> for ExtraTypes {
    fn from_iter<I: IntoIterator<Item = (S, CustomType)>>(iter: I) -> Self {
        let mut types = ExtraTypes::new();
        types.extend(iter);
        types
    }
}

impl<S: Into<String>> Extend<(S, CustomType)> for ExtraTypes {
    fn extend<I: IntoIterator<Item = (S, CustomType)>>(&mut self, iter: I) {
        for (code, ty) in iter {
            self.insert(code, ty);
        }
    }
}

/// The built-in type codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// No type code.
    Any,
    /// `w`
    Word,
    /// `W`
    NonWord,
    /// `s`
    Whitespace,
    /// `S`
    NonWhitespace,
    /// `l`
    Letters,
    /// `d`
    Integer,
    /// `D`
    NonDigits,
    /// `n`: integer with thousands separators.
    Grouped,
    /// `%`
    Percent,
    /// `f`
    Fixed,
    /// `e`
    Exponent,
    /// `g`
    General,
    /// `b`
    Binary,
    /// `o`
    Octal,
    /// `x`
    Hex,
    /// `ti`, `te`, `tg`, `ta`, `tc`, `th`, `ts`, `tt`
    DateTime(DateStyle),
}

impl BuiltinType {
    pub fn from_code(code: &str) -> Option<Self> {
        let ty = match code {
            "w" => BuiltinType::Word,
            "W" => BuiltinType::NonWord,
            "s" => BuiltinType::Whitespace,
            "S" => BuiltinType::NonWhitespace,
            "l" => BuiltinType::Letters,
            "d" => BuiltinType::Integer,
            "D" => BuiltinType::NonDigits,
            "n" => BuiltinType::Grouped,
            "%" => BuiltinType::Percent,
            "f" => BuiltinType::Fixed,
            "e" => BuiltinType::Exponent,
            "g" => BuiltinType::General,
            "b" => BuiltinType::Binary,
            "o" => BuiltinType::Octal,
            "x" => BuiltinType::Hex,
            _ => return DateStyle::from_code(code).map(BuiltinType::DateTime),
        };
        Some(ty)
    }

    /// The type code, or `""` for [`BuiltinType::Any`].
    pub fn code(self) -> &'static str {
        match self {
            BuiltinType::Any => "",
            BuiltinType::Word => "w",
            BuiltinType::NonWord => "W",
            BuiltinType::Whitespace => "s",
            BuiltinType::NonWhitespace => "S",
            BuiltinType::Letters => "l",
            BuiltinType::Integer => "d",
            BuiltinType::NonDigits => "D",
            BuiltinType::Grouped => "n",
            BuiltinType::Percent => "%",
            BuiltinType::Fixed => "f",
            BuiltinType::Exponent => "e",
            BuiltinType::General => "g",
            BuiltinType::Binary => "b",
            BuiltinType::Octal => "o",
            BuiltinType::Hex => "x",
            BuiltinType::DateTime(style) => style.code(),
        }
    }

    /// Numeric codes accept a sign and sign-aware padding.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            BuiltinType::Integer
                | BuiltinType::Grouped
                | BuiltinType::Percent
                | BuiltinType::Fixed
                | BuiltinType::Exponent
                | BuiltinType::General
                | BuiltinType::Binary
                | BuiltinType::Octal
                | BuiltinType::Hex
        )
    }

    /// Name of the [`Value`] variant this type produces.
    pub fn value_kind(self) -> &'static str {
        match self {
            BuiltinType::Any
            | BuiltinType::Word
            | BuiltinType::NonWord
            | BuiltinType::Whitespace
            | BuiltinType::NonWhitespace
            | BuiltinType::Letters
            | BuiltinType::NonDigits => "str",
            BuiltinType::Integer
            | BuiltinType::Grouped
            | BuiltinType::Binary
            | BuiltinType::Octal
            | BuiltinType::Hex => "int",
            BuiltinType::Percent
            | BuiltinType::Fixed
            | BuiltinType::Exponent
            | BuiltinType::General => "float",
            BuiltinType::DateTime(DateStyle::Time) => "time",
            BuiltinType::DateTime(_) => "datetime",
        }
    }

    /// The regex fragment. Digit classes are ASCII-only.
    pub fn fragment(self) -> Fragment {
        let pattern = match self {
            BuiltinType::Any => ANY_PATTERN,
            BuiltinType::Word => r"\w+",
            BuiltinType::NonWord => r"\W+",
            BuiltinType::Whitespace => r"\s+",
            BuiltinType::NonWhitespace => r"\S+",
            BuiltinType::Letters => r"\p{L}+",
            BuiltinType::Integer => "0[bB][01]+|0[oO][0-7]+|0[xX][0-9a-fA-F]+|[0-9]+",
            BuiltinType::NonDigits => "[^0-9]+",
            BuiltinType::Grouped => "[0-9]{1,3}(?:[,.][0-9]{3})*",
            BuiltinType::Percent => r"[0-9]+(?:\.[0-9]+)?%",
            BuiltinType::Fixed => r"[0-9]*\.[0-9]+",
            BuiltinType::Exponent => r"(?:[0-9]*\.[0-9]+|[0-9]+)[eE][-+]?[0-9]+|(?i:nan|inf)",
            BuiltinType::General => {
                r"(?:[0-9]*\.[0-9]+|[0-9]+)(?:[eE][-+]?[0-9]+)?|(?i:nan|inf)"
            }
            BuiltinType::Binary => r"(?:0[bB])?[01]+",
            BuiltinType::Octal => r"(?:0[oO])?[0-7]+",
            BuiltinType::Hex => r"(?:0[xX])?[0-9a-fA-F]+",
            BuiltinType::DateTime(style) => {
                let (pattern, groups) = style.fragment();
                return Fragment { pattern, groups };
            }
        };
        Fragment {
            pattern: pattern.to_string(),
            groups: 0,
        }
    }

    /// Convert matched text. `None` means the text is not a valid value of
    /// this type and the candidate match is rejected.
    pub fn convert(self, text: &str, internal: &[Option<&str>]) -> Option<Value> {
        match self {
            BuiltinType::Any
            | BuiltinType::Word
            | BuiltinType::NonWord
            | BuiltinType::Whitespace
            | BuiltinType::NonWhitespace
            | BuiltinType::Letters
            | BuiltinType::NonDigits => Some(Value::Str(text.to_string())),
            BuiltinType::Integer => numeric::parse_int(text, 10).map(Value::Int),
            BuiltinType::Binary => numeric::parse_int(text, 2).map(Value::Int),
            BuiltinType::Octal => numeric::parse_int(text, 8).map(Value::Int),
            BuiltinType::Hex => numeric::parse_int(text, 16).map(Value::Int),
            BuiltinType::Grouped => numeric::parse_grouped(text).map(Value::Int),
            BuiltinType::Percent => numeric::parse_percent(text).map(Value::Float),
            BuiltinType::Fixed | BuiltinType::Exponent | BuiltinType::General => {
                numeric::parse_float(text).map(Value::Float)
            }
            BuiltinType::DateTime(style) => style.convert(internal),
        }
    }
}

/// A regex fragment for one field and the number of capturing groups it
/// contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub pattern: String,
    pub groups: usize,
}

/// A type code resolved against the registry.
#[derive(Clone, Debug)]
pub enum ResolvedType {
    Builtin(BuiltinType),
    /// A code made of strftime directives, such as `%Y-%m-%d`.
    Strftime(StrftimeFormat),
    Custom { code: String, ty: CustomType },
}

impl ResolvedType {
    /// The code this type was resolved from.
    pub fn code(&self) -> &str {
        match self {
            ResolvedType::Builtin(builtin) => builtin.code(),
            ResolvedType::Strftime(format) => format.format(),
            ResolvedType::Custom { code, .. } => code,
        }
    }

    /// Name of the [`Value`] variant this type produces, or `None` for
    /// custom types, whose conversions may produce anything.
    pub fn value_kind(&self) -> Option<&'static str> {
        match self {
            ResolvedType::Builtin(builtin) => Some(builtin.value_kind()),
            ResolvedType::Strftime(format) => Some(format.value_kind()),
            ResolvedType::Custom { .. } => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ResolvedType::Builtin(builtin) if builtin.is_numeric())
    }

    pub fn fragment(&self) -> Fragment {
        match self {
            ResolvedType::Builtin(builtin) => builtin.fragment(),
            ResolvedType::Strftime(format) => {
                let (pattern, groups) = format.fragment();
                Fragment { pattern, groups }
            }
            ResolvedType::Custom { ty, .. } => Fragment {
                pattern: ty.pattern().unwrap_or(ANY_PATTERN).to_string(),
                groups: ty.group_count(),
            },
        }
    }

    /// Convert matched text.
    ///
    /// `Ok(None)` rejects the candidate (a built-in could not convert);
    /// `Err` is a user conversion failure and aborts the parse.
    pub fn convert(
        &self,
        text: &str,
        internal: &[Option<&str>],
    ) -> Result<Option<Value>, ConversionError> {
        match self {
            ResolvedType::Builtin(builtin) => Ok(builtin.convert(text, internal)),
            ResolvedType::Strftime(format) => Ok(format.convert(internal)),
            ResolvedType::Custom { ty, .. } => ty.convert(text).map(Some),
        }
    }
}

/// Resolve a type code: extra types first, then built-ins, then strftime
/// directives.
///
/// A field without a code resolves to [`BuiltinType::Any`]. A bare `%` is
/// the percent type, not a directive.
pub fn lookup(code: Option<&str>, extra: &ExtraTypes) -> Result<ResolvedType, UnknownType> {
    let Some(code) = code else {
        return Ok(ResolvedType::Builtin(BuiltinType::Any));
    };
    if let Some(ty) = extra.get(code) {
        return Ok(ResolvedType::Custom {
            code: code.to_string(),
            ty: ty.clone(),
        });
    }
    BuiltinType::from_code(code)
        .map(ResolvedType::Builtin)
        .or_else(|| StrftimeFormat::parse(code).map(ResolvedType::Strftime))
        .ok_or_else(|| UnknownType(code.to_string()))
}
