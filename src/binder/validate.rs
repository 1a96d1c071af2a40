//! Hold time validation

/// Parse the leading integer of `input` the way a browser's `parseInt` does.
///
/// Leading whitespace is skipped, one optional sign is accepted, and a `0x`
/// or `0X` after the sign switches to hexadecimal. Then the longest run of
/// digits in that radix is read and anything after it is ignored. Returns
/// `None` when no digit follows, so a bare `0x` is not a number. Magnitudes
/// beyond `i64` saturate.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let rest = input.trim_start();
    let (negative, unsigned) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let mut magnitude: i64 = 0;
    let mut seen_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen_digit = true;
        magnitude = magnitude
            .checked_mul(i64::from(radix))
            .and_then(|m| m.checked_add(i64::from(digit)))
            .unwrap_or(i64::MAX);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

/// A hold time is valid when it is non-empty, starts with an integer, and
/// that integer is at least `min`.
pub fn is_hold_time_valid(value: &str, min: i64) -> bool {
    !value.is_empty() && parse_int_prefix(value).is_some_and(|n| n >= min)
}
