use alloc::string::String;
use core::fmt;

use crate::commands::AckResult;

/// Reasons a received frame is rejected by [`validate`](crate::validate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer than [`MIN_SENTENCE_LEN`](crate::MIN_SENTENCE_LEN) bytes
    TooShort { len: usize },
    BadStartChar,
    /// The frame does not end with `\r\n`
    BadTerminator,
    IdentifierMismatch,
    /// No `*` five bytes before the end of the frame
    MissingChecksumMarker,
    /// The two characters after `*` are not hex digits
    MalformedChecksum,
    ChecksumMismatch {
        expect: u8,
        got: u8,
    },
    NotAscii,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooShort { len } => {
                write!(f, "Sentence too short, {} bytes", len)
            },
            ValidationError::BadStartChar => f.write_str("Sentence does not start with '$'"),
            ValidationError::BadTerminator => f.write_str("Sentence is not terminated by CR LF"),
            ValidationError::IdentifierMismatch => f.write_str("Unexpected sentence identifier"),
            ValidationError::MissingChecksumMarker => f.write_str("Missing checksum marker"),
            ValidationError::MalformedChecksum => f.write_str("Checksum is not two hex digits"),
            ValidationError::ChecksumMismatch { expect, got } => write!(
                f,
                "Not valid sentence checksum, expect {:02X}, got {:02X}",
                expect, got
            ),
            ValidationError::NotAscii => f.write_str("Sentence contains non-ASCII bytes"),
        }
    }
}

impl core::error::Error for ValidationError {}

/// Error building an outgoing command sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Identifier must be `$` followed by ASCII alphanumerics
    InvalidIdentifier,
    /// Argument contains a reserved or non-ASCII character
    InvalidArgument { index: usize },
    /// The descriptor expects another number of arguments
    ArgumentCount { expect: usize, got: usize },
    TooLong { len: usize, max: usize },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidIdentifier => f.write_str("Invalid command identifier"),
            CommandError::InvalidArgument { index } => {
                write!(f, "Invalid character in command argument #{}", index)
            },
            CommandError::ArgumentCount { expect, got } => write!(
                f,
                "Invalid number of command arguments, expect {}, got {}",
                expect, got
            ),
            CommandError::TooLong { len, max } => write!(
                f,
                "Command sentence too long, {} bytes (max {})",
                len, max
            ),
        }
    }
}

impl core::error::Error for CommandError {}

/// A field token that is not a decimal integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub index: usize,
    pub token: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field #{} is not an integer: {:?}", self.index, self.token)
    }
}

impl core::error::Error for FieldError {}

/// Failure reported by a [`Transport`](crate::Transport) implementation
#[derive(Debug)]
pub enum TransportError {
    /// No complete sentence arrived before the transport's deadline
    Timeout,
    Closed,
    /// A frame exceeded the framing buffer
    Overflow,
    Other(&'static str),
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Timeout => true,
            #[cfg(feature = "std")]
            TransportError::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => f.write_str("Transport timed out"),
            TransportError::Closed => f.write_str("Transport closed"),
            TransportError::Overflow => f.write_str("Frame exceeds transport buffer"),
            TransportError::Other(msg) => write!(f, "Transport error: {}", msg),
            #[cfg(feature = "std")]
            TransportError::Io(e) => write!(f, "Transport I/O error: {}", e),
        }
    }
}

impl core::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "std")]
            TransportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::TimedOut {
            TransportError::Timeout
        } else {
            TransportError::Io(e)
        }
    }
}

/// Read phase of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExchangePhase {
    Acknowledgement,
    QueryResult,
}

impl fmt::Display for ExchangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangePhase::Acknowledgement => f.write_str("acknowledgement"),
            ExchangePhase::QueryResult => f.write_str("query result"),
        }
    }
}

/// Everything that can end a command exchange with the receiver
#[derive(Debug)]
pub enum ExchangeError {
    InvalidCommand(CommandError),
    SendFailed(TransportError),
    ReadFailed {
        phase: ExchangePhase,
        source: TransportError,
    },
    InvalidSentence {
        phase: ExchangePhase,
        source: ValidationError,
    },
    /// `$PAIR001` without a decodable command id and result
    MalformedAck,
    AckMismatch {
        expect: u16,
        got: u16,
    },
    /// The receiver acknowledged the command with anything but sent-ok
    Rejected {
        command: &'static str,
        result: AckResult,
    },
    /// A PQTM command answered with `<identifier>ERROR`
    DeviceError {
        identifier: &'static str,
    },
    FieldCount {
        expect_min: usize,
        expect_max: usize,
        got: usize,
    },
    InvalidField(FieldError),
    /// Rejected before anything was sent
    OutOfRange {
        parameter: &'static str,
        value: i64,
    },
    /// The query result carries a value with no known meaning
    UnexpectedValue {
        parameter: &'static str,
        value: i64,
    },
    Transport(TransportError),
}

impl ExchangeError {
    /// The acknowledgement result, if the receiver rejected the command
    pub fn ack_result(&self) -> Option<AckResult> {
        match self {
            ExchangeError::Rejected { result, .. } => Some(*result),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ExchangeError::SendFailed(e)
            | ExchangeError::ReadFailed { source: e, .. }
            | ExchangeError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::InvalidCommand(e) => write!(f, "Cannot build command: {}", e),
            ExchangeError::SendFailed(e) => write!(f, "Command sending failed: {}", e),
            ExchangeError::ReadFailed { phase, source } => {
                write!(f, "Reading {} failed: {}", phase, source)
            },
            ExchangeError::InvalidSentence { phase, source } => {
                write!(f, "Invalid {} sentence: {}", phase, source)
            },
            ExchangeError::MalformedAck => f.write_str("Malformed acknowledgement sentence"),
            ExchangeError::AckMismatch { expect, got } => write!(
                f,
                "Acknowledgement for wrong command, expect {:03}, got {:03}",
                expect, got
            ),
            ExchangeError::Rejected { command, result } => {
                write!(f, "{} rejected: {}", command, result)
            },
            ExchangeError::DeviceError { identifier } => {
                write!(f, "{} answered with ERROR", identifier)
            },
            ExchangeError::FieldCount {
                expect_min,
                expect_max,
                got,
            } => {
                if expect_min == expect_max {
                    write!(
                        f,
                        "Invalid number of query fields, expect {}, got {}",
                        expect_min, got
                    )
                } else {
                    write!(
                        f,
                        "Invalid number of query fields, expect {}..={}, got {}",
                        expect_min, expect_max, got
                    )
                }
            },
            ExchangeError::InvalidField(e) => write!(f, "Invalid query field: {}", e),
            ExchangeError::OutOfRange { parameter, value } => {
                write!(f, "Value {} out of range for {}", value, parameter)
            },
            ExchangeError::UnexpectedValue { parameter, value } => {
                write!(f, "Unexpected value {} for {}", value, parameter)
            },
            ExchangeError::Transport(e) => write!(f, "Transport failure: {}", e),
        }
    }
}

impl core::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ExchangeError::InvalidCommand(e) => Some(e),
            ExchangeError::SendFailed(e)
            | ExchangeError::ReadFailed { source: e, .. }
            | ExchangeError::Transport(e) => Some(e),
            ExchangeError::InvalidSentence { source, .. } => Some(source),
            ExchangeError::InvalidField(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommandError> for ExchangeError {
    fn from(e: CommandError) -> Self {
        ExchangeError::InvalidCommand(e)
    }
}

impl From<FieldError> for ExchangeError {
    fn from(e: FieldError) -> Self {
        ExchangeError::InvalidField(e)
    }
}
