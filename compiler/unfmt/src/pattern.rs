//! Compiled patterns and the matching API.

use std::fmt;

use unfmt_types::{ConversionError, ExtraTypes};

use crate::compiler::{generate, FieldPlan};
use crate::engine::{Engine, Matcher, RawMatch, RegexEngine, Span};
use crate::evaluate::{evaluate, Parsed};
use crate::{CompileError, CompileOptions};

/// A template compiled into a matcher.
///
/// Immutable once built and safe to share between threads. Matching
/// methods return `Ok(None)` when the text does not fit the template and
/// `Err` only when a user conversion fails.
pub struct CompiledPattern {
    template: String,
    expression: String,
    matcher: Box<dyn Matcher>,
    fields: Vec<FieldPlan>,
    named: Vec<String>,
    fixed_count: usize,
}

impl CompiledPattern {
    /// Compile with default options and no extra types.
    pub fn new(template: &str) -> Result<Self, CompileError> {
        Self::with_options(template, &ExtraTypes::new(), &CompileOptions::default())
    }

    pub fn with_options(
        template: &str,
        extra: &ExtraTypes,
        options: &CompileOptions,
    ) -> Result<Self, CompileError> {
        Self::with_engine(template, extra, options, &RegexEngine)
    }

    /// Compile against a specific matching engine.
    pub fn with_engine(
        template: &str,
        extra: &ExtraTypes,
        options: &CompileOptions,
        engine: &dyn Engine,
    ) -> Result<Self, CompileError> {
        let program = generate(template, extra, options)?;
        let matcher = engine
            .compile(&program.expression, !options.case_sensitive)
            .map_err(|err| CompileError::Pattern { message: err.0 })?;

        let actual = matcher.group_count();
        if actual != program.groups {
            return Err(CompileError::GroupCountMismatch {
                declared: program.groups,
                actual,
            });
        }

        Ok(CompiledPattern {
            template: template.to_string(),
            expression: program.expression,
            matcher,
            fields: program.fields,
            named: program.named,
            fixed_count: program.fixed_count,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The generated pattern, unanchored.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Number of anonymous fields.
    pub fn fixed_count(&self) -> usize {
        self.fixed_count
    }

    /// Distinct field names, in order of first appearance.
    pub fn named_fields(&self) -> &[String] {
        &self.named
    }

    /// Match the whole text against the template.
    pub fn parse(&self, text: &str) -> Result<Option<Parsed>, ConversionError> {
        match self.parse_raw(text) {
            Some(found) => found.evaluate(),
            None => Ok(None),
        }
    }

    /// Match the whole text without converting field values.
    pub fn parse_raw<'t>(&self, text: &'t str) -> Option<Match<'_, 't>> {
        let raw = self.matcher.match_at(text, 0, text.len())?;
        Some(Match::new(self, text, raw))
    }

    /// The first occurrence of the template anywhere in the text.
    pub fn search(&self, text: &str) -> Result<Option<Parsed>, ConversionError> {
        self.search_at(text, 0, text.len())
    }

    /// The first occurrence starting at or after `pos` and ending at or
    /// before `end`.
    ///
    /// A candidate whose values fail to convert is skipped and scanning
    /// resumes one character after its start.
    pub fn search_at(
        &self,
        text: &str,
        pos: usize,
        end: usize,
    ) -> Result<Option<Parsed>, ConversionError> {
        let mut pos = pos;
        while let Some(found) = self.search_raw(text, pos, end) {
            if let Some(parsed) = found.evaluate()? {
                return Ok(Some(parsed));
            }
            pos = next_char(text, found.span().start);
        }
        Ok(None)
    }

    /// The first regex-level occurrence in `text[pos..end]`, unconverted.
    pub fn search_raw<'t>(&self, text: &'t str, pos: usize, end: usize) -> Option<Match<'_, 't>> {
        let end = end.min(text.len());
        if pos > end {
            return None;
        }
        let raw = self.matcher.next_match_from(text, pos, end)?;
        Some(Match::new(self, text, raw))
    }

    /// Every non-overlapping occurrence in the text.
    pub fn find_all<'p, 't>(&'p self, text: &'t str) -> FindAll<'p, 't> {
        self.find_all_at(text, 0, text.len())
    }

    /// Every non-overlapping occurrence in `text[pos..end]`.
    pub fn find_all_at<'p, 't>(&'p self, text: &'t str, pos: usize, end: usize) -> FindAll<'p, 't> {
        FindAll {
            pattern: self,
            text,
            pos,
            end: end.min(text.len()),
            done: false,
        }
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("template", &self.template)
            .field("expression", &self.expression)
            .field("fixed_count", &self.fixed_count)
            .field("named", &self.named)
            .finish_non_exhaustive()
    }
}

/// Byte offset of the character after the one at `pos`.
fn next_char(text: &str, pos: usize) -> usize {
    text.get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

/// A match whose field values have not been converted yet.
#[derive(Clone, Debug)]
pub struct Match<'p, 't> {
    pattern: &'p CompiledPattern,
    text: &'t str,
    raw: RawMatch,
}

impl<'p, 't> Match<'p, 't> {
    fn new(pattern: &'p CompiledPattern, text: &'t str, raw: RawMatch) -> Self {
        Match { pattern, text, raw }
    }

    /// Span of the whole match.
    pub fn span(&self) -> Span {
        self.raw.span()
    }

    /// The matched text.
    pub fn as_str(&self) -> &'t str {
        let span = self.raw.span();
        self.text.get(span.start..span.end).unwrap_or_default()
    }

    /// Convert the field values.
    ///
    /// `Ok(None)` when a built-in conversion rejects its text.
    pub fn evaluate(&self) -> Result<Option<Parsed>, ConversionError> {
        evaluate(self.text, &self.raw, &self.pattern.fields)
    }
}

/// Iterator over successive matches, from [`CompiledPattern::find_all`].
///
/// Each match resumes scanning at the end of the previous one, or one
/// character further after an empty match, so iteration always ends.
/// The iterator stops after yielding a conversion error.
#[derive(Debug)]
pub struct FindAll<'p, 't> {
    pattern: &'p CompiledPattern,
    text: &'t str,
    pos: usize,
    end: usize,
    done: bool,
}

impl Iterator for FindAll<'_, '_> {
    type Item = Result<Parsed, ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(found) = self.pattern.search_raw(self.text, self.pos, self.end) else {
                self.done = true;
                break;
            };
            let span = found.span();
            match found.evaluate() {
                Ok(Some(parsed)) => {
                    self.pos = if span.is_empty() {
                        next_char(self.text, span.end)
                    } else {
                        span.end
                    };
                    return Some(Ok(parsed));
                }
                Ok(None) => self.pos = next_char(self.text, span.start),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for FindAll<'_, '_> {}
