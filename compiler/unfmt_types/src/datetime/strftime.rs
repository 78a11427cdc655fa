//! strftime-style type codes such as `%Y-%m-%d`.
//!
//! A code is split into literal runs and `%` directives. Each directive is
//! a grammar piece, so the fragment and the binding of captures work the
//! same way as for the fixed styles. The directives present decide the
//! kind of value:
//!
//! - date directives only give a [`Value::Date`]
//! - time directives only give a [`Value::Time`]
//! - both give a [`Value::DateTime`]
//!
//! Fields the code leaves out take defaults: January 1st, midnight, UTC and
//! the current year.

use std::fmt;

use super::grammar::{self, Piece};
use super::Components;
use crate::value::{ClockTime, Value};

const DATE_DIRECTIVES: &str = "aAwdbBmyYjUW";
const TIME_DIRECTIVES: &str = "HIpMSfz";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Date,
    Time,
    DateTime,
}

#[derive(Clone)]
enum Token {
    Literal(String),
    Directive(&'static Piece),
}

/// A compiled strftime-style format.
#[derive(Clone)]
pub struct StrftimeFormat {
    format: String,
    tokens: Vec<Token>,
    kind: Kind,
}

impl StrftimeFormat {
    /// Compile a format, or `None` if it has an unknown directive, a
    /// trailing `%`, or no date or time directive at all.
    pub fn parse(format: &str) -> Option<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let (mut date, mut time) = (false, false);

        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let letter = chars.next()?;
            if letter == '%' {
                literal.push('%');
                continue;
            }
            let piece = grammar::directive(letter)?;
            date |= DATE_DIRECTIVES.contains(letter);
            time |= TIME_DIRECTIVES.contains(letter);
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Directive(piece));
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let kind = match (date, time) {
            (true, true) => Kind::DateTime,
            (true, false) => Kind::Date,
            (false, true) => Kind::Time,
            (false, false) => return None,
        };
        Some(StrftimeFormat {
            format: format.to_string(),
            tokens,
            kind,
        })
    }

    /// The format as written.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Name of the [`Value`] variant this format produces.
    pub fn value_kind(&self) -> &'static str {
        match self.kind {
            Kind::Date => "date",
            Kind::Time => "time",
            Kind::DateTime => "datetime",
        }
    }

    /// The regex fragment and its number of capture groups.
    pub fn fragment(&self) -> (String, usize) {
        let mut pattern = String::new();
        let mut groups = 0;
        for token in &self.tokens {
            match token {
                Token::Literal(text) => pattern.push_str(&regex::escape(text)),
                Token::Directive(piece) => {
                    groups += grammar::render(std::slice::from_ref(*piece), &mut pattern);
                }
            }
        }
        (pattern, groups)
    }

    /// Normalize the internal captures of one match, like
    /// [`DateStyle::convert`](super::DateStyle::convert).
    ///
    /// Hours must form a valid time of day here; nothing carries into the
    /// next day.
    pub fn convert(&self, groups: &[Option<&str>]) -> Option<Value> {
        let mut parts = Components::default();
        let mut groups = groups.iter().copied();
        for token in &self.tokens {
            if let Token::Directive(piece) = token {
                let pieces = std::slice::from_ref(*piece);
                grammar::walk(pieces, &mut groups, &mut |part, text| parts.set(part, text));
            }
        }
        // `%p` only qualifies `%I`.
        if parts.hour12.is_none() {
            parts.meridiem = None;
        }

        let offset = parts.offset()?;
        match self.kind {
            Kind::Date => parts.date().map(Value::Date),
            Kind::Time => Some(Value::Time(ClockTime::new(parts.time_of_day()?, offset))),
            Kind::DateTime => parts
                .date()?
                .and_time(parts.time_of_day()?)
                .and_local_timezone(offset)
                .single()
                .map(Value::DateTime),
        }
    }
}

impl fmt::Debug for StrftimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrftimeFormat")
            .field("format", &self.format)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
