//! Transport base64 codec.
//!
//! The recorder ships every 16-byte record as a standard-alphabet base64
//! string with `=` padding. Decoding fails closed: a length that is not a
//! multiple of four, or any character outside the alphabet (including a
//! misplaced pad), is an error rather than silence. Corrupted transport
//! strings must surface as decode failures, not as plausible bytes.

use thiserror::Error;

/// Standard base64 alphabet.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Reverse lookup table; -1 marks bytes outside the alphabet.
static SEXTETS: [i8; 256] = {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Error type for transport base64 decoding.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Base64Error {
    /// Input length is not a multiple of four characters.
    #[error("base64 length must be a multiple of 4")]
    InvalidLength,
    /// A character outside the standard alphabet, or a pad character
    /// anywhere but the final one or two positions.
    #[error("invalid base64 symbol")]
    InvalidSymbol,
}

#[inline]
fn sextet(byte: u8) -> Result<u8, Base64Error> {
    let value = SEXTETS[byte as usize];
    if value < 0 {
        Err(Base64Error::InvalidSymbol)
    } else {
        Ok(value as u8)
    }
}

/// Decodes a standard base64 string to raw bytes.
///
/// Decoding walks the input in four-character groups; the last group may
/// carry one or two `=` pads, producing two or one output bytes.
///
/// # Example
///
/// ```
/// use somnolog_wire::base64::from_base64;
///
/// assert_eq!(from_base64("aGVsbG8=").unwrap(), b"hello");
/// assert_eq!(from_base64("").unwrap(), b"");
/// assert!(from_base64("aGVsbG8").is_err());
/// ```
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, Base64Error> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = encoded.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(Base64Error::InvalidLength);
    }

    let mut padding = 0usize;
    if bytes[bytes.len() - 1] == b'=' {
        padding += 1;
        if bytes[bytes.len() - 2] == b'=' {
            padding += 1;
        }
    }

    // The final quartet is handled separately when padded.
    let main = bytes.len() - if padding > 0 { 4 } else { 0 };
    let mut out = Vec::with_capacity(bytes.len() / 4 * 3 - padding);

    let mut i = 0;
    while i < main {
        let s0 = sextet(bytes[i])?;
        let s1 = sextet(bytes[i + 1])?;
        let s2 = sextet(bytes[i + 2])?;
        let s3 = sextet(bytes[i + 3])?;
        out.push(s0 << 2 | s1 >> 4);
        out.push(s1 << 4 | s2 >> 2);
        out.push(s2 << 6 | s3);
        i += 4;
    }

    if padding == 1 {
        let s0 = sextet(bytes[main])?;
        let s1 = sextet(bytes[main + 1])?;
        let s2 = sextet(bytes[main + 2])?;
        out.push(s0 << 2 | s1 >> 4);
        out.push(s1 << 4 | s2 >> 2);
    } else if padding == 2 {
        let s0 = sextet(bytes[main])?;
        let s1 = sextet(bytes[main + 1])?;
        out.push(s0 << 2 | s1 >> 4);
    }

    Ok(out)
}

/// Encodes raw bytes to a standard base64 string with padding.
///
/// # Example
///
/// ```
/// use somnolog_wire::base64::to_base64;
///
/// assert_eq!(to_base64(b"hello"), "aGVsbG8=");
/// assert_eq!(to_base64(b""), "");
/// ```
pub fn to_base64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    let mut groups = bytes.chunks_exact(3);
    for group in groups.by_ref() {
        let word = usize::from(group[0]) << 16 | usize::from(group[1]) << 8 | usize::from(group[2]);
        out.push(ALPHABET[word >> 18] as char);
        out.push(ALPHABET[word >> 12 & 0x3F] as char);
        out.push(ALPHABET[word >> 6 & 0x3F] as char);
        out.push(ALPHABET[word & 0x3F] as char);
    }

    match groups.remainder() {
        [b0] => {
            out.push(ALPHABET[usize::from(*b0) >> 2] as char);
            out.push(ALPHABET[(usize::from(*b0) & 0x03) << 4] as char);
            out.push('=');
            out.push('=');
        }
        [b0, b1] => {
            out.push(ALPHABET[usize::from(*b0) >> 2] as char);
            out.push(ALPHABET[(usize::from(*b0) & 0x03) << 4 | usize::from(*b1) >> 4] as char);
            out.push(ALPHABET[(usize::from(*b1) & 0x0F) << 2] as char);
            out.push('=');
        }
        _ => {}
    }

    out
}
