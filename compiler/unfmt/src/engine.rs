//! The matching engine seam.
//!
//! The compiler emits one regex pattern per template and hands it to an
//! [`Engine`]. The engine returns a [`Matcher`] that reports group spans.
//! The rest of the crate never looks past this interface, so a different
//! regex implementation can be swapped in through
//! [`CompiledPattern::with_engine`](crate::CompiledPattern::with_engine).
//! [`RegexEngine`] is the default.

use regex::{Captures, Regex, RegexBuilder};

/// Byte range of a match or capture group in the input text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One successful match: the span of the whole match followed by the span
/// of every capture group, `None` where a group did not participate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMatch {
    groups: Vec<Option<Span>>,
}

impl RawMatch {
    /// Build from the whole-match span and the group spans in order.
    pub fn new(whole: Span, groups: impl IntoIterator<Item = Option<Span>>) -> Self {
        let mut all = vec![Some(whole)];
        all.extend(groups);
        RawMatch { groups: all }
    }

    /// Span of the whole match.
    pub fn span(&self) -> Span {
        self.groups
            .first()
            .copied()
            .flatten()
            .unwrap_or(Span::new(0, 0))
    }

    /// Span of capture group `index`, counting from 1.
    pub fn group(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied().flatten()
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }
}

/// Error from an engine that cannot compile a pattern.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Compiles generated patterns.
pub trait Engine {
    fn compile(
        &self,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Box<dyn Matcher>, EngineError>;
}

/// A compiled pattern, ready to run against text.
///
/// Offsets in and out are byte offsets into `text`. Implementations must
/// treat `.` as matching newlines.
pub trait Matcher: Send + Sync {
    /// Number of capture groups in the pattern.
    fn group_count(&self) -> usize;

    /// Match the whole of `text[start..end]`, anchored at both ends.
    fn match_at(&self, text: &str, start: usize, end: usize) -> Option<RawMatch>;

    /// The leftmost match starting at or after `pos` and ending at or
    /// before `end`.
    fn next_match_from(&self, text: &str, pos: usize, end: usize) -> Option<RawMatch>;
}

/// The default engine, backed by the `regex` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct RegexEngine;

impl Engine for RegexEngine {
    fn compile(
        &self,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Box<dyn Matcher>, EngineError> {
        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .dot_matches_new_line(true)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|err| EngineError(err.to_string()))
        };
        Ok(Box::new(RegexMatcher {
            anchored: build(&format!("^(?:{pattern})$"))?,
            search: build(pattern)?,
        }))
    }
}

#[derive(Debug)]
struct RegexMatcher {
    anchored: Regex,
    search: Regex,
}

impl Matcher for RegexMatcher {
    fn group_count(&self) -> usize {
        self.search.captures_len().saturating_sub(1)
    }

    fn match_at(&self, text: &str, start: usize, end: usize) -> Option<RawMatch> {
        let haystack = text.get(start..end)?;
        let caps = self.anchored.captures(haystack)?;
        Some(raw_match(&caps, start))
    }

    fn next_match_from(&self, text: &str, pos: usize, end: usize) -> Option<RawMatch> {
        let haystack = text.get(..end)?;
        if !haystack.is_char_boundary(pos) {
            return None;
        }
        let caps = self.search.captures_at(haystack, pos)?;
        Some(raw_match(&caps, 0))
    }
}

fn raw_match(caps: &Captures<'_>, offset: usize) -> RawMatch {
    let mut groups = caps
        .iter()
        .map(|m| m.map(|m| Span::new(m.start() + offset, m.end() + offset)));
    let whole = groups.next().flatten().unwrap_or(Span::new(offset, offset));
    RawMatch::new(whole, groups)
}
