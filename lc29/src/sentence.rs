use alloc::string::String;
use core::fmt;

use crate::{
    constants::{NMEA_MAX_SENTENCE_LENGTH, SENTENCE_START},
    error::CommandError,
    parser::{compute_checksum, encode_checksum},
};

/// An outgoing, fully framed command sentence
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sentence(String);

impl Sentence {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<[u8]> for Sentence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentence").field(&self.0.trim_end()).finish()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim_end())
    }
}

fn is_valid_identifier(identifier: &str) -> bool {
    let bytes = identifier.as_bytes();
    bytes.len() > 1
        && bytes[0] == SENTENCE_START
        && bytes[1..].iter().all(u8::is_ascii_alphanumeric)
}

fn is_valid_argument(arg: &str) -> bool {
    arg.bytes()
        .all(|b| (b.is_ascii_graphic() || b == b' ') && !matches!(b, b',' | b'*' | b'$'))
}

/// Builds `<identifier>[,<arg>]*HH\r\n`.
///
/// `identifier` includes the leading `$`. The result always passes
/// [`validate`](crate::validate) against the same identifier with checksum
/// verification on.
pub fn build_command(identifier: &str, args: &[&str]) -> Result<Sentence, CommandError> {
    if !is_valid_identifier(identifier) {
        return Err(CommandError::InvalidIdentifier);
    }
    if let Some(index) = args.iter().position(|arg| !is_valid_argument(arg)) {
        return Err(CommandError::InvalidArgument { index });
    }

    let len = identifier.len() + args.iter().map(|a| a.len() + 1).sum::<usize>() + 5;
    if len > NMEA_MAX_SENTENCE_LENGTH {
        return Err(CommandError::TooLong {
            len,
            max: NMEA_MAX_SENTENCE_LENGTH,
        });
    }

    let mut text = String::with_capacity(len);
    text.push_str(identifier);
    for arg in args {
        text.push(',');
        text.push_str(arg);
    }
    text.push('*');
    let ck = encode_checksum(compute_checksum(text.as_bytes()));
    text.push(char::from(ck[0]));
    text.push(char::from(ck[1]));
    text.push_str("\r\n");
    debug_assert_eq!(text.len(), len);

    Ok(Sentence(text))
}
