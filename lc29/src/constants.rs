pub(crate) const SENTENCE_START: u8 = b'$';
pub(crate) const CHECKSUM_MARKER: u8 = b'*';
pub(crate) const FIELD_SEPARATOR: u8 = b',';
pub(crate) const TERMINATOR: [u8; 2] = *b"\r\n";

/// `*` followed by two hex digits and the two byte terminator
pub(crate) const CHECKSUM_MARKER_OFFSET_FROM_END: usize = 5;
pub(crate) const CHECKSUM_DIGITS_OFFSET_FROM_END: usize = 4;

/// Shortest frame accepted by [`validate`](crate::validate)
pub const MIN_SENTENCE_LEN: usize = 9;

/// NMEA 0183 limit, including `$` and the terminator
pub const NMEA_MAX_SENTENCE_LENGTH: usize = 82;

/// Upper bound for a single frame held by [`SentenceFramer`](crate::SentenceFramer)
pub const MAX_FRAME_LEN: usize = 256;

/// Identifier of the generic PAIR acknowledgement, `$PAIR001,<Command_ID>,<Result>`
pub const PAIR_ACK_IDENTIFIER: &str = "$PAIR001";

pub(crate) const PAIR_FAMILY_PREFIX: &str = "$PAIR";
pub(crate) const PQTM_OK_SUFFIX: &str = "OK";
pub(crate) const PQTM_ERROR_SUFFIX: &str = "ERROR";
