//! Raw upload payload splitting.
//!
//! Uploads arrive as one delimited string of quoted base64 tokens,
//! `"AAB...","BBC...","CCD..."`, sometimes with the quotes
//! backslash-escaped by an outer JSON layer. Splitting unescapes,
//! strips the wrapping quotes, and cuts on the `","` seams. Token
//! content is not validated here; defective tokens are the scanner's
//! business.

/// Unescapes `\"` to `"`, then drops the opening quote and the final
/// character (the closing quote of the last token).
fn strip_wrapping(payload: &str) -> String {
    let unescaped = payload.replace("\\\"", "\"");
    let mut cleaned = unescaped.replacen('"', "", 1);
    cleaned.pop();
    cleaned
}

/// Splits a quoted payload into base64 tokens.
///
/// `newest_first` reverses the split so that a newest-first upload comes
/// out oldest-first, the order the defect scanner expects.
///
/// # Example
///
/// ```
/// use somnolog::payload::split_tokens;
///
/// let tokens = split_tokens(r#""AAAA","BBBB","CCCC""#, false);
/// assert_eq!(tokens, ["AAAA", "BBBB", "CCCC"]);
///
/// let tokens = split_tokens(r#""AAAA","BBBB","CCCC""#, true);
/// assert_eq!(tokens, ["CCCC", "BBBB", "AAAA"]);
/// ```
pub fn split_tokens(payload: &str, newest_first: bool) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }

    let cleaned = strip_wrapping(payload);
    let mut tokens: Vec<String> = cleaned.split("\",\"").map(str::to_owned).collect();
    if newest_first {
        tokens.reverse();
    }
    tokens
}

/// Number of tokens a payload splits into.
pub fn token_count(payload: &str) -> usize {
    if payload.is_empty() {
        return 0;
    }
    strip_wrapping(payload).split("\",\"").count()
}
