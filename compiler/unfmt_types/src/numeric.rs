//! Numeric converters for the built-in number codes.
//!
//! Each function takes the text the field's pattern matched, including an
//! optional leading sign and leading spaces, and returns `None` when the
//! text cannot become a number of the requested kind. Out-of-range integers
//! are rejections, not errors.

/// Split leading spaces and a `+`/`-` sign off the text.
fn split_sign(text: &str) -> (bool, &str) {
    let text = text.trim_start_matches(' ');
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// A `0b`/`0o`/`0x` prefix (either case) and the radix it names.
fn radix_prefix(digits: &str) -> Option<(u32, &str)> {
    let rest = digits.strip_prefix('0')?;
    let mut chars = rest.chars();
    let radix = match chars.next()? {
        'b' | 'B' => 2,
        'o' | 'O' => 8,
        'x' | 'X' => 16,
        _ => return None,
    };
    Some((radix, chars.as_str()))
}

/// Signed value of a magnitude, so `i64::MIN` round-trips.
fn apply_sign(negative: bool, magnitude: u64) -> Option<i64> {
    if negative {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Integer in the given radix.
///
/// Radix 10 is the `d` code: a `0b`, `0o` or `0x` prefix switches the radix.
/// Other radixes only strip their own prefix, so `0B1` in hex is `0xB1`.
pub(crate) fn parse_int(text: &str, radix: u32) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    let (radix, digits) = match radix_prefix(digits) {
        Some((prefixed, rest)) if radix == 10 || prefixed == radix => (prefixed, rest),
        _ => (radix, digits),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    apply_sign(negative, magnitude)
}

/// Integer written with `,` or `.` thousands separators (the `n` code).
pub(crate) fn parse_grouped(text: &str) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    let digits: String = digits.chars().filter(|c| !matches!(c, ',' | '.')).collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<u64>().ok()?;
    apply_sign(negative, magnitude)
}

/// Float, including `nan` and `inf` in any case.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    text.trim_start_matches(' ').parse::<f64>().ok()
}

/// Percentage as a fraction: `50%` is `0.5`.
pub(crate) fn parse_percent(text: &str) -> Option<f64> {
    let number = text.trim_end().strip_suffix('%')?;
    parse_float(number).map(|x| x / 100.0)
}

#[cfg(test)]
mod tests;
