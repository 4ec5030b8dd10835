//! Percent-decoding for query strings
//!
//! Reverses `%XX` escapes and the form-encoding convention of `+` for space.
//! A `%` that is not followed by two hex digits is kept as a literal `%`.

/// Value of a single ASCII hex digit.
fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode a percent-encoded string.
///
/// Works in one pass over the input bytes, so a `+` produced by `%2B` stays a
/// `+`. Escapes that decode to invalid UTF-8 are replaced with U+FFFD.
///
/// ```
/// use common::utils::percent::decode;
/// assert_eq!(decode("C%2B%2B%20vs%20Java"), "C++ vs Java");
/// assert_eq!(decode("a+b"), "a b");
/// ```
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_val);
                let lo = bytes.get(i + 2).copied().and_then(hex_val);
                match (hi, lo) {
                    (Some(h), Some(l)) => {
                        out.push((h << 4) | l);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a query string into decoded `(key, value)` pairs, keeping order.
///
/// Empty segments (`a=1&&b=2`) are skipped; a segment without `=` yields an
/// empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut it = seg.splitn(2, '=');
            let key = it.next().unwrap_or_default();
            let value = it.next().unwrap_or_default();
            (decode(key), decode(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_space_escape_in_query() {
        assert_eq!(
            decode("name=Vijay%20Kumar&city=Coimbatore"),
            "name=Vijay Kumar&city=Coimbatore"
        );
    }

    #[test]
    fn encoded_plus_is_not_turned_into_space() {
        assert_eq!(decode("C%2B%2B%20vs%20Java"), "C++ vs Java");
    }

    #[test]
    fn plus_is_space() {
        assert_eq!(decode("a+b"), "a b");
        assert_eq!(decode("++"), "  ");
    }

    #[test]
    fn safe_text_is_unchanged() {
        let text = "Hello-World_2024.txt~ok";
        assert_eq!(decode(text), text);
        assert_eq!(decode(""), "");
    }

    #[test]
    fn hex_digits_in_either_case() {
        assert_eq!(decode("%41%42"), "AB");
        assert_eq!(decode("%2f%2F"), "//");
    }

    #[test]
    fn malformed_escape_keeps_literal_percent() {
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%4"), "%4");
        assert_eq!(decode("50%+off"), "50% off");
        // the `%` is kept and scanning resumes right after it
        assert_eq!(decode("%%41"), "%A");
    }

    #[test]
    fn multibyte_utf8_sequences_decode() {
        assert_eq!(decode("caf%C3%A9"), "café");
        assert_eq!(decode("%E0%AE%95"), "க");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn non_ascii_input_passes_through() {
        assert_eq!(decode("naïve+Ω"), "naïve Ω");
    }

    #[test]
    fn parse_query_splits_and_decodes() {
        let pairs = parse_query("a=1&b=x+y&&c");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x y".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn parse_query_keeps_equals_in_value() {
        let pairs = parse_query("expr=a%3Db=c&name=Vijay%20Kumar");
        assert_eq!(pairs[0], ("expr".to_string(), "a=b=c".to_string()));
        assert_eq!(pairs[1], ("name".to_string(), "Vijay Kumar".to_string()));
        assert!(parse_query("").is_empty());
    }
}
