//! # lc29
//!
//! A pure-rust host driver for Quectel LC29H GNSS receivers, controlled through the checksum-framed PAIR and PQTM text sentences.
//!
//! The crate is split in two layers: a sentence codec of pure functions, and a [`Driver`] that runs command exchanges over any [`Transport`] and mirrors the confirmed receiver configuration in a [`DriverState`].
//!
//! Building Sentences
//! ==================
//!
//! ```
//! let cmd = lc29::build_command("$PAIR050", &["1000"]).unwrap();
//! assert_eq!(cmd.as_str(), "$PAIR050,1000*12\r\n");
//! ```
//!
//! Validating Sentences
//! ====================
//!
//! Received frames are checked for length, framing, identifier and checksum by [`validate`]:
//! ```
//! let ack = lc29::validate("$PAIR001", b"$PAIR001,051,0*3F\r\n", true).unwrap();
//! assert_eq!(ack.fields(2), vec![51, 0]);
//!
//! assert_eq!(
//!     lc29::validate("$PAIR001", b"$PAIR001,051,0*3E\r\n", true),
//!     Err(lc29::ValidationError::ChecksumMismatch { expect: 0x3E, got: 0x3F }),
//! );
//! ```
//!
//! Stream-oriented transports reassemble frames with a [`SentenceFramer`]:
//! ```
//! let mut framer = lc29::SentenceFramer::default();
//! let mut it = framer.consume(b"noise$PAIR001,051,0*3F\r\n$PAIR05");
//! assert_eq!(it.next().unwrap().unwrap(), b"$PAIR001,051,0*3F\r\n");
//! assert!(it.next().is_none());
//! ```
//!
//! Running Commands
//! ================
//!
//! Every typed operation of [`Driver`] sends one command, checks the `$PAIR001` acknowledgement and, for getters, decodes the query result before updating the state:
//! ```
//! # use lc29::{Transport, TransportError};
//! # struct Uart(std::collections::VecDeque<&'static [u8]>);
//! # impl Transport for Uart {
//! #     type Setting = ();
//! #     fn initialize(&mut self) -> Result<(), TransportError> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), TransportError> { Ok(()) }
//! #     fn read(&mut self, buf: &mut Vec<u8>) -> Result<(), TransportError> {
//! #         buf.extend_from_slice(self.0.pop_front().ok_or(TransportError::Closed)?);
//! #         Ok(())
//! #     }
//! #     fn configure(&mut self, _: ()) -> Result<(), TransportError> { Ok(()) }
//! # }
//! # let uart = Uart(vec![
//! #     &b"$PAIR001,050,0*3E\r\n"[..],
//! #     &b"$PAIR001,051,0*3F\r\n"[..],
//! #     &b"$PAIR051,500*27\r\n"[..],
//! # ].into());
//! let mut driver = lc29::Driver::new(uart);
//! driver.initialize()?;
//! driver.set_fix_rate(500)?;
//! assert_eq!(driver.get_fix_rate()?, 500);
//! assert_eq!(driver.state().fix_rate_ms(), 500);
//! # Ok::<(), lc29::ExchangeError>(())
//! ```
//!
//! no_std Support
//! ==============
//!
//! With `default-features = false` the crate only needs `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

#[macro_use]
mod macros;

pub mod commands;
mod config;
mod constants;
mod driver;
mod error;
mod parser;
mod sentence;
mod state;
mod transport;
pub mod types;

pub use crate::{
    commands::{AckKind, AckResult, Arity, CommandDescriptor},
    config::{DriverConfig, FieldParsing},
    constants::{MAX_FRAME_LEN, MIN_SENTENCE_LEN, NMEA_MAX_SENTENCE_LENGTH, PAIR_ACK_IDENTIFIER},
    driver::{Driver, SUPPORTED_BAUD_RATES},
    error::{
        CommandError, ExchangeError, ExchangePhase, FieldError, TransportError, ValidationError,
    },
    parser::{
        compute_checksum, crop_payload, field_tokens, has_checksum_marker, parse_lenient,
        split_fields, try_split_fields, validate, FramerIter, SentenceFramer, SentenceRef,
    },
    sentence::{build_command, Sentence},
    state::{DriverState, InsMessageConfig},
    transport::Transport,
    types::*,
};
