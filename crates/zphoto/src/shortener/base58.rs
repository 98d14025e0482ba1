//! Flickr-style base-58 short codes.
//!
//! The alphabet drops `0`, `l`, `I` and `O` so codes stay readable.

/// Digits, then lowercase without `l`, then uppercase without `I` and `O`.
pub const ALPHABET: &[u8; 58] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Encode a photo ID as a short code, most significant symbol first.
#[must_use]
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Decode a short code back into a photo ID.
///
/// Returns `None` for empty input, symbols outside the alphabet, or values
/// that do not fit in a `u64`.
#[must_use]
pub fn decode(code: &str) -> Option<u64> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0u64, |acc, b| {
        let digit = ALPHABET.iter().position(|&a| a == b)? as u64;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}
