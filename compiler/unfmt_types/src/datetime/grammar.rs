//! Per-style grammars for the datetime codes.
//!
//! A grammar is a static tree of [`Piece`]s. The same tree renders the
//! regex fragment at compile time and binds capture groups to date parts
//! at match time, so the two can never drift apart.
//!
//! Digit classes are ASCII-only; `\d` would also accept other scripts'
//! digits, which the numeric conversions cannot read.

/// The component of a date or time a capture group holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Part {
    Year,
    /// Two-digit year.
    ShortYear,
    Month,
    Day,
    DayOfYear,
    Hour,
    /// Hour on a twelve-hour clock.
    Hour12,
    Minute,
    Second,
    Fraction,
    Meridiem,
    Offset,
}

pub(super) enum Piece {
    /// Pattern text that is matched but not captured.
    Skip(&'static str),
    /// A captured component.
    Take(Part, &'static str),
    /// A required run of pieces.
    Seq(&'static [Piece]),
    /// An optional run of pieces.
    Maybe(&'static [Piece]),
}

use Part::{
    Day, DayOfYear, Fraction, Hour, Hour12, Meridiem, Minute, Month, Offset, Second, ShortYear,
    Year,
};
use Piece::{Maybe, Seq, Skip, Take};

macro_rules! month_abbr {
    () => {
        "(?i:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)"
    };
}

macro_rules! month_full {
    () => {
        "(?i:january|february|march|april|may|june|july|august|september|october|november|december)"
    };
}

macro_rules! numeric_offset {
    () => {
        "[-+][0-9]{1,2}:?[0-9]{2}"
    };
}

const WEEKDAY: &str = "(?i:mon|tue|wed|thu|fri|sat|sun)";
const WEEKDAY_FULL: &str = "(?i:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";
const DIGITS_1_2: &str = "[0-9]{1,2}";
const YEAR: Piece = Take(Year, "[0-9]{4}");
const NUMERIC_OFFSET: &str = numeric_offset!();
const AM_PM: &str = "(?i:[ap]m)";

/// Month as a number, a full name, or an abbreviation. Full names come
/// first so `March` is not cut short at `Mar`.
const MONTH_ANY: &str = concat!("[0-9]{1,2}|", month_full!(), "|", month_abbr!());
const MONTH_ABBR: &str = month_abbr!();
const MONTH_FULL: &str = month_full!();

/// `HH:MM[:SS[.ffffff]]`
const CLOCK: &[Piece] = &[
    Take(Hour, DIGITS_1_2),
    Skip(":"),
    Take(Minute, DIGITS_1_2),
    Maybe(&[
        Skip(":"),
        Take(Second, DIGITS_1_2),
        Maybe(&[Skip(r"\."), Take(Fraction, "[0-9]+")]),
    ]),
];

/// `HH:MM[:SS]`, as mail headers write it.
const CLOCK_NO_FRACTION: &[Piece] = &[
    Take(Hour, DIGITS_1_2),
    Skip(":"),
    Take(Minute, DIGITS_1_2),
    Maybe(&[Skip(":"), Take(Second, DIGITS_1_2)]),
];

/// Optional clock with an optional AM/PM, then an optional offset.
const CLOCK_TAIL: &[Piece] = &[
    Maybe(&[
        Skip(r"\s+"),
        Seq(CLOCK),
        Maybe(&[Skip(r"\s*"), Take(Meridiem, AM_PM)]),
    ]),
    Maybe(&[Skip(r"\s+"), Take(Offset, NUMERIC_OFFSET)]),
];

/// `YYYY-MM-DD[(T| )HH:MM[:SS[.ffffff]]][Z|±HH[:]MM]`
pub(super) const ISO: &[Piece] = &[
    YEAR,
    Skip("-"),
    Take(Month, "[0-9]{2}"),
    Skip("-"),
    Take(Day, "[0-9]{2}"),
    Maybe(&[Skip(r"(?:[Tt]|\s+)?"), Seq(CLOCK)]),
    Maybe(&[Take(Offset, concat!("[Zz]|", numeric_offset!()))]),
];

/// `[Day, ]D Mon YYYY HH:MM[:SS] ±HHMM`
pub(super) const EMAIL: &[Piece] = &[
    Maybe(&[Skip(WEEKDAY), Skip(r",\s+")]),
    Take(Day, DIGITS_1_2),
    Skip(r"\s+"),
    Take(Month, MONTH_ABBR),
    Skip(r"\s+"),
    YEAR,
    Skip(r"\s+"),
    Seq(CLOCK_NO_FRACTION),
    Skip(r"\s+"),
    Take(Offset, NUMERIC_OFFSET),
];

/// Day first: `D/M/YYYY`, with `-` or `/`, then an optional clock.
pub(super) const GLOBAL: &[Piece] = &[
    Take(Day, DIGITS_1_2),
    Skip("[-/]"),
    Take(Month, MONTH_ANY),
    Skip("[-/]"),
    YEAR,
    Seq(CLOCK_TAIL),
];

/// Month first: `M/D/YYYY`, with `-` or `/`, then an optional clock.
pub(super) const AMERICAN: &[Piece] = &[
    Take(Month, MONTH_ANY),
    Skip("[-/]"),
    Take(Day, DIGITS_1_2),
    Skip("[-/]"),
    YEAR,
    Seq(CLOCK_TAIL),
];

/// `Day Mon D HH:MM:SS YYYY`
pub(super) const CTIME: &[Piece] = &[
    Skip(WEEKDAY),
    Skip(r"\s+"),
    Take(Month, MONTH_ABBR),
    Skip(r"\s+"),
    Take(Day, DIGITS_1_2),
    Skip(r"\s+"),
    Seq(CLOCK),
    Skip(r"\s+"),
    YEAR,
];

/// `D/Mon/YYYY:HH:MM:SS ±HHMM`, as web server logs write it.
pub(super) const HTTP: &[Piece] = &[
    Take(Day, DIGITS_1_2),
    Skip("[-/]"),
    Take(Month, MONTH_ABBR),
    Skip("[-/]"),
    YEAR,
    Skip(":"),
    Seq(CLOCK),
    Skip(r"\s+"),
    Take(Offset, NUMERIC_OFFSET),
];

/// `Mon D HH:MM:SS`, as syslog writes it. The year is the current one.
pub(super) const SYSLOG: &[Piece] = &[
    Take(Month, MONTH_ABBR),
    Skip(r"\s+"),
    Take(Day, DIGITS_1_2),
    Skip(r"\s+"),
    Seq(CLOCK),
];

/// `HH:MM[:SS[.ffffff]] [AM|PM] [±HH[:]MM]`
pub(super) const TIME: &[Piece] = &[
    Seq(CLOCK),
    Maybe(&[Skip(r"\s*"), Take(Meridiem, AM_PM)]),
    Maybe(&[Skip(r"\s+"), Take(Offset, NUMERIC_OFFSET)]),
];

/// The piece a strftime directive letter stands for.
///
/// Weekdays and week numbers are matched but carry no date information.
pub(super) fn directive(letter: char) -> Option<&'static Piece> {
    let piece = match letter {
        'a' => &Skip(WEEKDAY),
        'A' => &Skip(WEEKDAY_FULL),
        'w' => &Skip("[0-6]"),
        'U' | 'W' => &Skip(DIGITS_1_2),
        'd' => &Take(Day, DIGITS_1_2),
        'b' => &Take(Month, MONTH_ABBR),
        'B' => &Take(Month, MONTH_FULL),
        'm' => &Take(Month, DIGITS_1_2),
        'y' => &Take(ShortYear, "[0-9]{2}"),
        'Y' => &YEAR,
        'j' => &Take(DayOfYear, "[0-9]{1,3}"),
        'H' => &Take(Hour, DIGITS_1_2),
        'I' => &Take(Hour12, DIGITS_1_2),
        'p' => &Take(Meridiem, AM_PM),
        'M' => &Take(Minute, DIGITS_1_2),
        'S' => &Take(Second, DIGITS_1_2),
        'f' => &Take(Fraction, "[0-9]{1,6}"),
        'z' => &Take(Offset, "[-+][0-9]{2}(?::?[0-9]{2}){0,2}"),
        _ => return None,
    };
    Some(piece)
}

/// Render a grammar into `out`, returning the number of capture groups.
pub(super) fn render(pieces: &[Piece], out: &mut String) -> usize {
    let mut groups = 0;
    for piece in pieces {
        match piece {
            Skip(pattern) => out.push_str(pattern),
            Take(_, pattern) => {
                out.push('(');
                out.push_str(pattern);
                out.push(')');
                groups += 1;
            }
            Seq(inner) => groups += render(inner, out),
            Maybe(inner) => {
                out.push_str("(?:");
                groups += render(inner, out);
                out.push_str(")?");
            }
        }
    }
    groups
}

/// Walk a grammar alongside the capture groups it rendered, in order,
/// handing each captured component to `bind`.
pub(super) fn walk<'t>(
    pieces: &[Piece],
    groups: &mut impl Iterator<Item = Option<&'t str>>,
    bind: &mut impl FnMut(Part, &'t str),
) {
    for piece in pieces {
        match piece {
            Skip(_) => {}
            Take(part, _) => {
                if let Some(Some(text)) = groups.next() {
                    bind(*part, text);
                }
            }
            Seq(inner) | Maybe(inner) => walk(inner, groups, bind),
        }
    }
}
