//! Payload cropping and comma-delimited field extraction.
//!
//! Field helpers take sentence text whose first comma-separated token is the
//! identifier (or what is left of it), so `"$PAIR063,0,3*3C\r\n"` and
//! `"063,0,3*3C"` both carry the fields `0` and `3`.

use alloc::{string::ToString, vec::Vec};

use crate::error::FieldError;

const MARKER: char = '*';
const SEPARATOR: char = ',';

/// Text between the first `,` and the `*` marker.
///
/// Returns `None` when there is no `*`, and an empty payload when the
/// sentence carries no fields.
pub fn crop_payload(sentence: &str) -> Option<&str> {
    let head = &sentence[..sentence.find(MARKER)?];
    match head.find(SEPARATOR) {
        Some(pos) => Some(&head[pos + 1..]),
        None => Some(""),
    }
}

/// Iterates the raw field tokens of a sentence, skipping the identifier
pub fn field_tokens(text: &str) -> impl Iterator<Item = &str> {
    let body = match text.find(MARKER) {
        Some(pos) => &text[..pos],
        None => text,
    };
    body.split(SEPARATOR).skip(1)
}

/// Splits up to `max_fields` fields and parses them leniently.
///
/// Every token is read like C `atoi`: leading whitespace and a sign are
/// accepted, digits are consumed until the first non-digit, and a token
/// without leading digits reads as `0`. Malformed tokens are therefore
/// accepted silently; use [`try_split_fields`] to reject them.
pub fn split_fields(text: &str, max_fields: usize) -> Vec<i64> {
    field_tokens(text)
        .take(max_fields)
        .map(parse_lenient)
        .collect()
}

/// Like [`split_fields`], but every token must be a complete decimal integer
pub fn try_split_fields(text: &str, max_fields: usize) -> Result<Vec<i64>, FieldError> {
    field_tokens(text)
        .take(max_fields)
        .enumerate()
        .map(|(index, token)| {
            token.parse::<i64>().map_err(|_| FieldError {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Legacy integer parsing, saturating on overflow
pub fn parse_lenient(token: &str) -> i64 {
    let bytes = token.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_crop_payload() {
        assert_eq!(crop_payload("$PAIR051,1000*13\r\n"), Some("1000"));
        assert_eq!(crop_payload("$PAIR063,0,3*3C\r\n"), Some("0,3"));
        assert_eq!(crop_payload("$PAIR051*3E\r\n"), Some(""));
        assert_eq!(crop_payload("$PAIR051,1000"), None);
    }

    #[test]
    fn test_split_fields_from_payload_style_text() {
        assert_eq!(split_fields("063,0,3*3C", 2), vec![0, 3]);
    }

    #[test]
    fn test_split_fields_from_whole_sentence() {
        assert_eq!(split_fields("$PAIR063,0,3*3C\r\n", 2), vec![0, 3]);
        assert_eq!(split_fields("$PAIR051,1000*13\r\n", 1), vec![1000]);
        assert_eq!(
            split_fields("$PAIR067,1,0,0,0,0,0*3A\r\n", 6),
            vec![1, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_split_fields_is_bounded() {
        assert_eq!(split_fields("$PAIR067,1,0,0,0,0,0*3A\r\n", 2), vec![1, 0]);
        assert_eq!(split_fields("$PAIR051*3E\r\n", 3), Vec::<i64>::new());
    }

    #[test]
    fn test_split_fields_without_marker_reads_to_end() {
        assert_eq!(split_fields("$PAIR059,15", 1), vec![15]);
    }

    #[test]
    fn test_field_tokens_keeps_empty_tokens() {
        let tokens: Vec<&str> = field_tokens("$PAIR491,1,*00\r\n").collect();
        assert_eq!(tokens, vec!["1", ""]);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("1000"), 1000);
        assert_eq!(parse_lenient("-1"), -1);
        assert_eq!(parse_lenient("+7"), 7);
        assert_eq!(parse_lenient("  42"), 42);
        assert_eq!(parse_lenient("12abc"), 12);
        assert_eq!(parse_lenient("abc"), 0);
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("-"), 0);
        assert_eq!(parse_lenient("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_lenient("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_try_split_fields_rejects_garbage() {
        assert_eq!(try_split_fields("$PAIR063,0,3*3C\r\n", 2), Ok(vec![0, 3]));
        assert_eq!(
            try_split_fields("$PAIR063,0,x3*3C\r\n", 2),
            Err(FieldError {
                index: 1,
                token: "x3".into(),
            })
        );
        assert!(try_split_fields("$PAIR051,*13\r\n", 1).is_err());
    }
}
