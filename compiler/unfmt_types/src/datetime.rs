//! Datetime sub-parser behind the `t*` type codes and strftime-style codes.
//!
//! Each [`DateStyle`] owns a grammar (see `grammar.rs`) whose capture groups
//! are internal to the field. At match time the captured components are
//! bound back to their parts and normalized into a chrono value:
//!
//! - month names and abbreviations map to 1-12, case-insensitively
//! - `PM` adds twelve hours to the clock
//! - fractional seconds are truncated to nanoseconds
//! - a missing offset means UTC, a missing year means the current one
//!
//! Impossible dates and out-of-range minutes or seconds make the candidate
//! fail to match rather than raising an error.

mod grammar;
mod strftime;

use chrono::{Datelike, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta};

use crate::value::{ClockTime, Value};
use grammar::{Part, Piece};

pub use strftime::StrftimeFormat;

/// Which textual datetime layout a `t*` code accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DateStyle {
    /// `ti`: ISO 8601.
    Iso,
    /// `te`: RFC 2822 mail headers.
    Email,
    /// `tg`: day before month.
    Global,
    /// `ta`: month before day.
    American,
    /// `tc`: `ctime()` output.
    Ctime,
    /// `th`: common log format.
    Http,
    /// `ts`: syslog timestamps, which carry no year.
    Syslog,
    /// `tt`: time of day only.
    Time,
}

impl DateStyle {
    pub const ALL: [DateStyle; 8] = [
        DateStyle::Iso,
        DateStyle::Email,
        DateStyle::Global,
        DateStyle::American,
        DateStyle::Ctime,
        DateStyle::Http,
        DateStyle::Syslog,
        DateStyle::Time,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            DateStyle::Iso => "ti",
            DateStyle::Email => "te",
            DateStyle::Global => "tg",
            DateStyle::American => "ta",
            DateStyle::Ctime => "tc",
            DateStyle::Http => "th",
            DateStyle::Syslog => "ts",
            DateStyle::Time => "tt",
        }
    }

    fn grammar(self) -> &'static [Piece] {
        match self {
            DateStyle::Iso => grammar::ISO,
            DateStyle::Email => grammar::EMAIL,
            DateStyle::Global => grammar::GLOBAL,
            DateStyle::American => grammar::AMERICAN,
            DateStyle::Ctime => grammar::CTIME,
            DateStyle::Http => grammar::HTTP,
            DateStyle::Syslog => grammar::SYSLOG,
            DateStyle::Time => grammar::TIME,
        }
    }

    /// The regex fragment for this style and its number of capture groups.
    pub fn fragment(self) -> (String, usize) {
        let mut pattern = String::new();
        let groups = grammar::render(self.grammar(), &mut pattern);
        (pattern, groups)
    }

    /// Normalize the internal captures of one match into a value.
    ///
    /// `groups` holds the field's internal capture groups in order, `None`
    /// for groups that did not participate. Returns `None` when the
    /// components do not form a valid date or time.
    pub fn convert(self, groups: &[Option<&str>]) -> Option<Value> {
        let parts = Components::bind(self.grammar(), groups);
        let offset = parts.offset()?;
        let clock = parts.clock()?;

        if self == DateStyle::Time {
            let (time, _) = midnight()?.overflowing_add_signed(clock);
            return Some(Value::Time(ClockTime::new(time, offset)));
        }

        let local = parts
            .date()?
            .and_time(midnight()?)
            .checked_add_signed(clock)?;
        local
            .and_local_timezone(offset)
            .single()
            .map(Value::DateTime)
    }
}

/// Captured text for each date part of one match.
#[derive(Default, Debug)]
struct Components<'t> {
    year: Option<&'t str>,
    short_year: Option<&'t str>,
    month: Option<&'t str>,
    day: Option<&'t str>,
    day_of_year: Option<&'t str>,
    hour: Option<&'t str>,
    hour12: Option<&'t str>,
    minute: Option<&'t str>,
    second: Option<&'t str>,
    fraction: Option<&'t str>,
    meridiem: Option<&'t str>,
    offset: Option<&'t str>,
}

impl<'t> Components<'t> {
    fn bind(pieces: &[Piece], groups: &[Option<&'t str>]) -> Self {
        let mut parts = Components::default();
        let mut groups = groups.iter().copied();
        grammar::walk(pieces, &mut groups, &mut |part, text| parts.set(part, text));
        parts
    }

    fn set(&mut self, part: Part, text: &'t str) {
        let slot = match part {
            Part::Year => &mut self.year,
            Part::ShortYear => &mut self.short_year,
            Part::Month => &mut self.month,
            Part::Day => &mut self.day,
            Part::DayOfYear => &mut self.day_of_year,
            Part::Hour => &mut self.hour,
            Part::Hour12 => &mut self.hour12,
            Part::Minute => &mut self.minute,
            Part::Second => &mut self.second,
            Part::Fraction => &mut self.fraction,
            Part::Meridiem => &mut self.meridiem,
            Part::Offset => &mut self.offset,
        };
        *slot = Some(text);
    }

    /// Four-digit year, else two-digit year (69-99 is 19xx), else the
    /// current year.
    fn year(&self) -> Option<i32> {
        match (self.year, self.short_year) {
            (Some(text), _) => text.parse().ok(),
            (None, Some(text)) => {
                let short: i32 = text.parse().ok()?;
                Some(if short < 69 { 2000 + short } else { 1900 + short })
            }
            (None, None) => Some(Local::now().year()),
        }
    }

    fn month(&self) -> Option<u32> {
        let Some(text) = self.month else {
            return Some(1);
        };
        if text.bytes().all(|b| b.is_ascii_digit()) {
            text.parse().ok()
        } else {
            month_number(text)
        }
    }

    fn day(&self) -> Option<u32> {
        self.day.map_or(Some(1), |text| text.parse().ok())
    }

    /// The calendar date. A day of the year overrides month and day.
    fn date(&self) -> Option<NaiveDate> {
        let year = self.year()?;
        match self.day_of_year {
            Some(text) => NaiveDate::from_yo_opt(year, text.parse().ok()?),
            None => NaiveDate::from_ymd_opt(year, self.month()?, self.day()?),
        }
    }

    fn offset(&self) -> Option<FixedOffset> {
        match self.offset {
            Some(text) => parse_offset(text),
            None => FixedOffset::east_opt(0),
        }
    }

    /// Time since midnight. Hours are not range-checked so PM and large
    /// hour values carry into the next day; minutes and seconds must be
    /// below 60.
    ///
    /// A twelve-hour clock reading (`%I`) follows the usual rules instead:
    /// it must be 1-12, `12 AM` is midnight and `12 PM` is noon.
    fn clock(&self) -> Option<TimeDelta> {
        let minutes = number_or_zero(self.minute)?;
        let seconds = number_or_zero(self.second)?;
        if minutes > 59 || seconds > 59 {
            return None;
        }
        let pm = self.meridiem.is_some_and(|m| m.eq_ignore_ascii_case("pm"));
        let hours = match self.hour12 {
            Some(text) => {
                let hour: i64 = text.parse().ok()?;
                if !(1..=12).contains(&hour) {
                    return None;
                }
                hour % 12 + if pm { 12 } else { 0 }
            }
            None => number_or_zero(self.hour)? + if pm { 12 } else { 0 },
        };
        let nanos = self.fraction.map_or(Some(0), fraction_nanos)?;
        Some(
            TimeDelta::hours(hours)
                + TimeDelta::minutes(minutes)
                + TimeDelta::seconds(seconds)
                + TimeDelta::nanoseconds(nanos),
        )
    }

    /// The clock as a time of day; readings of 24:00 or later are rejected.
    fn time_of_day(&self) -> Option<NaiveTime> {
        let (time, wrapped) = midnight()?.overflowing_add_signed(self.clock()?);
        (wrapped == 0).then_some(time)
    }
}

fn midnight() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(0, 0, 0)
}

fn number_or_zero(text: Option<&str>) -> Option<i64> {
    text.map_or(Some(0), |t| t.parse().ok())
}

/// Fractional-second digits as nanoseconds, truncated past nine digits.
fn fraction_nanos(digits: &str) -> Option<i64> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let kept = digits.get(..9).unwrap_or(digits);
    let missing = 9_usize.checked_sub(kept.len())?;
    let scale = 10_i64.checked_pow(u32::try_from(missing).ok()?)?;
    kept.parse::<i64>().ok()?.checked_mul(scale)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// `Z` or a signed offset as a fixed offset.
///
/// Accepted forms: `±H[H]`, `±H[H]MM`, `±HHMMSS`, and the same with colons
/// between the fields.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (negative, rest) = match text.split_at_checked(1)? {
        ("+", rest) => (false, rest),
        ("-", rest) => (true, rest),
        _ => return None,
    };
    let (hours, minutes, seconds) = if rest.contains(':') {
        let mut fields = rest.split(':');
        let hours = fields.next()?;
        let minutes = fields.next().unwrap_or("");
        let seconds = fields.next().unwrap_or("");
        if fields.next().is_some() {
            return None;
        }
        (hours, minutes, seconds)
    } else {
        // Peel two-digit minute and second fields off the right.
        let pairs = (rest.len().saturating_sub(1) / 2).min(2);
        let (hours, tail) = rest.split_at_checked(rest.len() - 2 * pairs)?;
        let (minutes, seconds) = tail.split_at_checked(tail.len().min(2))?;
        (hours, minutes, seconds)
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes = offset_field(minutes)?;
    let seconds = offset_field(seconds)?;
    if minutes > 59 || seconds > 59 {
        return None;
    }
    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?;
    FixedOffset::east_opt(if negative { -total } else { total })
}

fn offset_field(text: &str) -> Option<i32> {
    if text.is_empty() {
        Some(0)
    } else {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests;
