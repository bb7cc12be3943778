//! Identifier escaping for URL path segments.
//!
//! Resource names (databases, tables, queries) may contain `/`, `.` or even
//! already percent-encoded bytes. Percent-encoding them again would collide
//! with request middleware that decodes `%XX` before routing, so names are
//! escaped with `~` as the escape marker instead:
//!
//! | Input            | Encoded            |
//! |------------------|--------------------|
//! | `/foo/bar`       | `~2Ffoo~2Fbar`     |
//! | `name.json`      | `name~2Ejson`      |
//! | `hello world`    | `hello+world`      |
//! | `50%`            | `50~25`            |
//!
//! The encoded form only ever contains `A-Z a-z 0-9 _ - + ~`, so it never
//! holds a `/` or a `.` and a format suffix appended after it is unambiguous.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Bytes escaped by [`tilde_encode`]: everything except `A-Z a-z 0-9 _ -`.
const TILDE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

/// Bytes escaped by [`quote_plus`]: everything except `A-Z a-z 0-9 _ . - ~`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Failure to turn a tilde-encoded segment back into text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decoded bytes of `{0}` are not valid UTF-8")]
    InvalidUtf8(String),
}

/// Escape an identifier so it can be embedded as a single path segment.
///
/// # Examples
/// ```
/// use mounturl::encoding::tilde_encode;
/// assert_eq!(tilde_encode("/foo/bar"), "~2Ffoo~2Fbar");
/// assert_eq!(tilde_encode("name.json"), "name~2Ejson");
/// assert_eq!(tilde_encode("hello world"), "hello+world");
/// ```
pub fn tilde_encode(identifier: &str) -> String {
    // Every `%` in the percent-encoded output starts an escape, so `%20` can
    // only be an encoded space.
    utf8_percent_encode(identifier, TILDE_ESCAPE)
        .to_string()
        .replace("%20", "+")
        .replace('%', "~")
}

/// Invert [`tilde_encode`].
///
/// A literal `%` is never treated as an escape, and malformed `~` sequences
/// are kept as they are.
///
/// # Examples
/// ```
/// use mounturl::encoding::tilde_decode;
/// assert_eq!(tilde_decode("~2Ffoo~2Fbar").unwrap(), "/foo/bar");
/// assert_eq!(tilde_decode("hello+world").unwrap(), "hello world");
/// assert_eq!(tilde_decode("50%2F").unwrap(), "50%2F");
/// ```
pub fn tilde_decode(encoded: &str) -> Result<String, DecodeError> {
    percent_decode_str(&stage_escapes(encoded))
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8(encoded.to_string()))
}

/// Rewrite tilde escapes into percent escapes for `percent_decode_str`.
///
/// Literal `%` becomes `%25` and `+` becomes `%20`. A `~` only turns into `%`
/// when two hex digits follow it.
fn stage_escapes(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut staged = String::with_capacity(encoded.len() + 8);

    for (i, c) in encoded.char_indices() {
        match c {
            '%' => staged.push_str("%25"),
            '+' => staged.push_str("%20"),
            '~' if bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit) =>
            {
                staged.push('%');
            }
            _ => staged.push(c),
        }
    }
    staged
}

/// Form-style encoding for a query-string value (`application/x-www-form-urlencoded`).
///
/// # Examples
/// ```
/// use mounturl::encoding::quote_plus;
/// assert_eq!(quote_plus("column name"), "column+name");
/// assert_eq!(quote_plus("a/b&c"), "a%2Fb%26c");
/// ```
pub fn quote_plus(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ESCAPE)
        .to_string()
        .replace("%20", "+")
}

/// Append a `.{format}` suffix to a path.
///
/// Identifiers in the final segment are expected to be tilde-encoded already,
/// so the last `.` of the result is always the format delimiter.
#[inline]
pub fn append_format(path: &str, format: &str) -> String {
    format!("{path}.{format}")
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilde_encode_safe_passthrough() {
        assert_eq!(tilde_encode("facetable"), "facetable");
        assert_eq!(tilde_encode("under_score-dash"), "under_score-dash");
        assert_eq!(tilde_encode("ABC123"), "ABC123");
        assert_eq!(tilde_encode(""), "");
    }

    #[test]
    fn test_tilde_encode_reserved() {
        assert_eq!(tilde_encode("/foo/bar"), "~2Ffoo~2Fbar");
        assert_eq!(tilde_encode("name.json"), "name~2Ejson");
        assert_eq!(tilde_encode("~"), "~7E");
        assert_eq!(tilde_encode("%2F"), "~252F");
        assert_eq!(tilde_encode("a+b"), "a~2Bb");
        assert_eq!(tilde_encode("hello world"), "hello+world");
    }

    #[test]
    fn test_tilde_encode_non_ascii() {
        assert_eq!(tilde_encode("中"), "~E4~B8~AD");
        assert_eq!(tilde_encode("café"), "caf~C3~A9");
    }

    #[test]
    fn test_tilde_encode_output_alphabet() {
        let samples = ["a/b.c~d%e f+g", "../../etc/passwd", "name.json", "中文.csv"];
        for sample in samples {
            let encoded = tilde_encode(sample);
            assert!(
                encoded
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '~')),
                "unexpected character in {encoded}"
            );
            assert!(!encoded.contains('/'));
            assert!(!encoded.contains('.'));
        }
    }

    #[test]
    fn test_tilde_decode() {
        assert_eq!(tilde_decode("~2Ffoo~2Fbar").unwrap(), "/foo/bar");
        assert_eq!(tilde_decode("name~2Ejson").unwrap(), "name.json");
        assert_eq!(tilde_decode("hello+world").unwrap(), "hello world");
        assert_eq!(tilde_decode("~E4~B8~AD").unwrap(), "中");
    }

    #[test]
    fn test_tilde_decode_keeps_literal_percent() {
        assert_eq!(tilde_decode("50%2F").unwrap(), "50%2F");
        assert_eq!(tilde_decode("~25").unwrap(), "%");
    }

    #[test]
    fn test_tilde_decode_malformed_escape() {
        assert_eq!(tilde_decode("~zz").unwrap(), "~zz");
        assert_eq!(tilde_decode("a~").unwrap(), "a~");
        assert_eq!(tilde_decode("~2Fx~q").unwrap(), "/x~q");
    }

    #[test]
    fn test_tilde_decode_invalid_utf8() {
        assert!(tilde_decode("~FF").is_err());
    }

    #[test]
    fn test_tilde_roundtrip_distinct_identifiers() {
        // Pairs that a naive scheme would merge
        let identifiers = [
            "a/b", "a~2Fb", "a%2Fb", "a b", "a+b", "a.b", "a~2Eb", "a~b", "a", "a.", "a~",
        ];
        let encoded: Vec<String> = identifiers.iter().map(|s| tilde_encode(s)).collect();

        for (i, a) in encoded.iter().enumerate() {
            assert_eq!(tilde_decode(a).unwrap(), identifiers[i]);
            for b in &encoded[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_quote_plus() {
        assert_eq!(quote_plus("data"), "data");
        assert_eq!(quote_plus("column name"), "column+name");
        assert_eq!(quote_plus("a/b&c=d"), "a%2Fb%26c%3Dd");
        assert_eq!(quote_plus("keep_.-~"), "keep_.-~");
        assert_eq!(quote_plus("+"), "%2B");
    }

    #[test]
    fn test_append_format() {
        assert_eq!(append_format("/db/name", "json"), "/db/name.json");
        assert_eq!(
            append_format(&format!("/db/{}", tilde_encode("name.json")), "json"),
            "/db/name~2Ejson.json"
        );
    }
}
