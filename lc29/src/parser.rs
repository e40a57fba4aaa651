mod checksum;
mod fields;
mod framer;

use alloc::vec::Vec;
use core::fmt;

use crate::{
    constants::{
        CHECKSUM_DIGITS_OFFSET_FROM_END, CHECKSUM_MARKER, CHECKSUM_MARKER_OFFSET_FROM_END,
        FIELD_SEPARATOR, MIN_SENTENCE_LEN, SENTENCE_START, TERMINATOR,
    },
    error::{FieldError, ValidationError},
};

pub use checksum::compute_checksum;
pub(crate) use checksum::encode_checksum;
pub use fields::{crop_payload, field_tokens, parse_lenient, split_fields, try_split_fields};
pub use framer::{FramerIter, SentenceFramer};

/// True iff the byte five positions before the end is `*`.
///
/// This is a fixed-offset check, not a search: it presumes the frame ends
/// with exactly two checksum digits and the two byte terminator.
pub fn has_checksum_marker(sentence: &[u8]) -> bool {
    sentence.len() >= CHECKSUM_MARKER_OFFSET_FROM_END
        && sentence[sentence.len() - CHECKSUM_MARKER_OFFSET_FROM_END] == CHECKSUM_MARKER
}

/// Validates a received frame against the identifier it should carry.
///
/// Checks run in a fixed order: length, start character, terminator,
/// identifier prefix, checksum marker and, if `verify_checksum` is set, the
/// checksum itself. `expected_identifier` includes the leading `$` and is
/// compared as a byte prefix.
pub fn validate<'a>(
    expected_identifier: &str,
    sentence: &'a [u8],
    verify_checksum: bool,
) -> Result<SentenceRef<'a>, ValidationError> {
    let len = sentence.len();
    if len < MIN_SENTENCE_LEN {
        return Err(ValidationError::TooShort { len });
    }
    if sentence[0] != SENTENCE_START {
        return Err(ValidationError::BadStartChar);
    }
    if sentence[len - TERMINATOR.len()..] != TERMINATOR {
        return Err(ValidationError::BadTerminator);
    }
    if !sentence.starts_with(expected_identifier.as_bytes()) {
        return Err(ValidationError::IdentifierMismatch);
    }
    if !has_checksum_marker(sentence) {
        return Err(ValidationError::MissingChecksumMarker);
    }
    if verify_checksum {
        let digits = len - CHECKSUM_DIGITS_OFFSET_FROM_END;
        let expect = checksum::decode_checksum(sentence[digits], sentence[digits + 1])
            .ok_or(ValidationError::MalformedChecksum)?;
        let got = compute_checksum(sentence);
        if expect != got {
            return Err(ValidationError::ChecksumMismatch { expect, got });
        }
    }
    let text = core::str::from_utf8(sentence)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or(ValidationError::NotAscii)?;

    Ok(SentenceRef { text })
}

/// A received frame that passed [`validate`]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SentenceRef<'a> {
    text: &'a str,
}

impl<'a> SentenceRef<'a> {
    /// The whole frame, terminator included
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Leading tag up to the first `,` or `*`, including `$`
    pub fn identifier(&self) -> &'a str {
        let end = self
            .text
            .bytes()
            .position(|b| b == FIELD_SEPARATOR || b == CHECKSUM_MARKER)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn payload(&self) -> &'a str {
        crop_payload(self.text).unwrap_or_default()
    }

    /// Field tokens between the identifier and `*`
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        field_tokens(self.text)
    }

    pub fn field_count(&self) -> usize {
        self.tokens().count()
    }

    /// First `max_fields` fields, parsed leniently
    pub fn fields(&self, max_fields: usize) -> Vec<i64> {
        split_fields(self.text, max_fields)
    }

    pub fn try_fields(&self, max_fields: usize) -> Result<Vec<i64>, FieldError> {
        try_split_fields(self.text, max_fields)
    }

    /// Checksum digits as transmitted
    pub fn transmitted_checksum(&self) -> Option<u8> {
        let bytes = self.text.as_bytes();
        let digits = bytes.len() - CHECKSUM_DIGITS_OFFSET_FROM_END;
        checksum::decode_checksum(bytes[digits], bytes[digits + 1])
    }
}

impl fmt::Debug for SentenceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SentenceRef")
            .field(&self.text.trim_end())
            .finish()
    }
}

impl fmt::Display for SentenceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.trim_end())
    }
}
