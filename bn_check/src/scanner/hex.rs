//! Hexadecimal literal parsing

use num_bigint::BigInt;

/// Parse an optionally signed base-16 literal.
///
/// Accepts one leading `+` or `-` followed by at least one ASCII hex digit.
/// Prefixes (`0x`), separators and embedded whitespace are rejected.
pub fn parse_hex(text: &str) -> Option<BigInt> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 16)?;
    Some(if negative { -magnitude } else { magnitude })
}
