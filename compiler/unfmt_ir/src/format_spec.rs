//! Format specification parser for template fields.
//!
//! Parses the spec syntax `[[fill]align][sign][#][0][width][,][.precision][type]`
//! that follows the colon in a placeholder such as `{total:>10,d}`.
//!
//! The parsed result ([`FormatSpec`]) is read in reverse compared to a
//! formatter: alignment and fill describe padding the matcher must skip, and
//! the type code selects the converter. Width and precision are recorded but
//! never enforced as exact lengths.

/// Parsed format specification from a template field.
///
/// All fields are `Option`/`false` by default, so an empty spec `{x:}`
/// produces [`FormatSpec::EMPTY`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatSpec {
    /// Padding character (default: space, or `0` with the zero flag).
    pub fill: Option<char>,
    /// Alignment direction.
    pub align: Option<Align>,
    /// Sign display the text was formatted with.
    pub sign: Option<Sign>,
    /// Alternate form (`#`).
    pub alternate: bool,
    /// Zero-pad flag (`0`): leading zeros may precede the digits.
    pub zero_pad: bool,
    /// Advisory minimum field width.
    pub width: Option<usize>,
    /// Thousands separator flag (`,`).
    pub grouping: bool,
    /// Advisory precision.
    pub precision: Option<usize>,
    /// Type code selecting the value converter (`d`, `ti`, or a custom name).
    pub type_code: Option<String>,
}

impl FormatSpec {
    /// An empty spec with no options set.
    pub const EMPTY: Self = Self {
        fill: None,
        align: None,
        sign: None,
        alternate: false,
        zero_pad: false,
        width: None,
        grouping: false,
        precision: None,
        type_code: None,
    };

    /// The padding character the matcher skips around the value.
    pub fn fill_char(&self) -> char {
        match self.fill {
            Some(c) => c,
            None if self.zero_pad || self.align == Some(Align::ZeroPad) => '0',
            None => ' ',
        }
    }

    /// The alignment that decides where padding may appear.
    ///
    /// A width without an explicit alignment means the value was probably
    /// right-aligned, so leading padding is tolerated.
    pub fn padding(&self) -> Option<Align> {
        match (self.align, self.width) {
            (Some(align), _) => Some(align),
            (None, Some(_)) => Some(Align::Right),
            (None, None) => None,
        }
    }
}

/// Alignment direction for field padding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// `<`: padding on the right.
    Left,
    /// `>`: padding on the left.
    Right,
    /// `^`: padding on both sides.
    Center,
    /// `=`: padding between the sign and the digits.
    ZeroPad,
}

/// Sign display mode for numeric values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// `+`: always show sign.
    Plus,
    /// `-`: sign only for negatives.
    Minus,
    /// ` `: space for positive, `-` for negative.
    Space,
}

/// Error from parsing a format specification string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatSpecError {
    /// Width is not a valid number.
    #[error("invalid width '{0}'")]
    InvalidWidth(String),
    /// Precision is not a valid number.
    #[error("invalid precision '{0}'")]
    InvalidPrecision(String),
    /// Type code contains characters no type name can hold.
    #[error("invalid type code '{0}'")]
    InvalidTypeCode(String),
}

/// Parse a format specification string.
///
/// Syntax: `[[fill]align][sign][#][0][width][,][.precision][type]`
///
/// Everything after the precision is the type code; it is not checked
/// against any registry here.
///
/// # Examples
///
/// ```ignore
/// parse_format_spec(">10")     // align=Right, width=10
/// parse_format_spec("08x")     // zero_pad, width=8, type="x"
/// parse_format_spec("*^20.5f") // fill='*', align=Center, width=20, precision=5, type="f"
/// parse_format_spec("ti")      // type="ti"
/// parse_format_spec("%H:%M")   // type="%H:%M"
/// ```
pub fn parse_format_spec(spec: &str) -> Result<FormatSpec, FormatSpecError> {
    if spec.is_empty() {
        return Ok(FormatSpec::EMPTY);
    }

    let mut result = FormatSpec::EMPTY;
    let chars: Vec<char> = spec.chars().collect();
    let mut pos = 0;

    // Parse [[fill]align]
    // Look ahead: if chars[1] is an alignment char, then chars[0] is fill.
    if chars.len() >= 2 && is_align_char(chars[1]) {
        result.fill = Some(chars[0]);
        result.align = parse_align(chars[1]);
        pos = 2;
    } else if is_align_char(chars[0]) {
        result.align = parse_align(chars[0]);
        pos = 1;
    }

    // Parse [sign]
    if let Some(&c) = chars.get(pos) {
        let sign = match c {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            ' ' => Some(Sign::Space),
            _ => None,
        };
        if sign.is_some() {
            result.sign = sign;
            pos += 1;
        }
    }

    // Parse [#]
    if chars.get(pos) == Some(&'#') {
        result.alternate = true;
        pos += 1;
    }

    // Parse [0]
    if chars.get(pos) == Some(&'0') {
        result.zero_pad = true;
        pos += 1;
    }

    // Parse [width]
    let width_start = pos;
    while chars.get(pos).is_some_and(char::is_ascii_digit) {
        pos += 1;
    }
    if pos > width_start {
        let width_str: String = chars[width_start..pos].iter().collect();
        result.width = Some(
            width_str
                .parse()
                .map_err(|_| FormatSpecError::InvalidWidth(width_str))?,
        );
    }

    // Parse [,]
    if chars.get(pos) == Some(&',') {
        result.grouping = true;
        pos += 1;
    }

    // Parse [.precision]
    if chars.get(pos) == Some(&'.') {
        pos += 1;
        let prec_start = pos;
        while chars.get(pos).is_some_and(char::is_ascii_digit) {
            pos += 1;
        }
        if pos > prec_start {
            let prec_str: String = chars[prec_start..pos].iter().collect();
            result.precision = Some(
                prec_str
                    .parse()
                    .map_err(|_| FormatSpecError::InvalidPrecision(prec_str))?,
            );
        } else {
            // `.` with no digits means precision 0
            result.precision = Some(0);
        }
    }

    // Parse [type]
    if pos < chars.len() {
        let code: String = chars[pos..].iter().collect();
        // strftime-style codes (`%H:%M %p`) may hold spaces and colons.
        let strftime = code.len() > 1 && code.contains('%');
        let reserved = |c: char| c.is_whitespace() || c == ':';
        if code
            .chars()
            .any(|c| matches!(c, '{' | '}') || (!strftime && reserved(c)))
        {
            return Err(FormatSpecError::InvalidTypeCode(code));
        }
        result.type_code = Some(code);
    }

    Ok(result)
}

fn is_align_char(c: char) -> bool {
    matches!(c, '<' | '>' | '^' | '=')
}

fn parse_align(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::ZeroPad),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
