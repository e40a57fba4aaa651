mod dr;
mod pair;

use alloc::{string::String, vec::Vec};
use core::ops::RangeInclusive;

use log::{debug, trace, warn};

use crate::{
    commands::{AckKind, AckResult, Arity, CommandDescriptor},
    config::{DriverConfig, FieldParsing},
    constants::{PAIR_ACK_IDENTIFIER, PQTM_ERROR_SUFFIX, PQTM_OK_SUFFIX},
    error::{CommandError, ExchangeError, ExchangePhase},
    parser::{validate, SentenceRef},
    sentence::build_command,
    state::{DriverState, StateUpdate},
    transport::Transport,
};

pub use pair::SUPPORTED_BAUD_RATES;

/// Progress of a single exchange, logged at trace level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeState {
    Idle,
    Sent,
    AckPending,
    AckAccepted,
    AckRejected,
    QueryPending,
    QueryAccepted,
    QueryFailed,
    Done,
}

/// Command/response orchestrator for one LC29H receiver.
///
/// Every operation runs a complete exchange: the command sentence is
/// written, the acknowledgement is read and checked and, for get commands,
/// the query result is read and decoded. [`DriverState`] is only updated once
/// all of this succeeded. No exchange is retried.
///
/// All operations take `&mut self`; share a driver between threads by
/// wrapping the whole value in a single mutex.
pub struct Driver<T: Transport> {
    transport: T,
    state: DriverState,
    config: DriverConfig,
    rx: Vec<u8>,
}

impl<T: Transport> Driver<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DriverConfig::default())
    }

    pub fn with_config(transport: T, config: DriverConfig) -> Self {
        Self {
            transport,
            state: DriverState::default(),
            config,
            rx: Vec::new(),
        }
    }

    pub fn initialize(&mut self) -> Result<(), ExchangeError> {
        self.transport
            .initialize()
            .map_err(ExchangeError::Transport)
    }

    /// Reconfigures the transport, e.g. after the receiver's baud rate changed
    pub fn configure_transport(&mut self, setting: T::Setting) -> Result<(), ExchangeError> {
        self.transport
            .configure(setting)
            .map_err(ExchangeError::Transport)
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Direct channel access; bytes exchanged this way bypass the driver state
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Runs one exchange and returns the decoded query fields.
    ///
    /// Set commands return an empty vector. The driver state is not touched;
    /// the typed operations apply their results after decoding them.
    pub fn execute(
        &mut self,
        command: &CommandDescriptor,
        args: &[&str],
    ) -> Result<Vec<i64>, ExchangeError> {
        if args.len() != command.num_args {
            return Err(CommandError::ArgumentCount {
                expect: command.num_args,
                got: args.len(),
            }
            .into());
        }
        // PAIR commands are matched by the numeric id echoed in `$PAIR001`
        let pair_code = match command.ack {
            AckKind::Pair => Some(command.pair_code().ok_or(CommandError::InvalidIdentifier)?),
            AckKind::Pqtm => None,
        };
        let sentence = build_command(command.identifier, args)?;

        debug!("-> {}", sentence);
        self.transport
            .write(sentence.as_bytes())
            .map_err(ExchangeError::SendFailed)?;
        transition(command, ExchangeState::Idle, ExchangeState::Sent);

        let fields = match pair_code {
            Some(expect) => {
                self.await_pair_ack(command, expect)?;
                match command.query {
                    Some(arity) => self.await_query_result(command, arity)?,
                    None => Vec::new(),
                }
            },
            None => self.await_pqtm_reply(command)?,
        };

        transition(command, ExchangeState::AckAccepted, ExchangeState::Done);
        Ok(fields)
    }

    /// Runs an exchange, decodes its fields and applies the resulting update
    pub(crate) fn execute_and_apply<R>(
        &mut self,
        command: &CommandDescriptor,
        args: &[&str],
        decode: impl FnOnce(&[i64]) -> Result<(R, StateUpdate), ExchangeError>,
    ) -> Result<R, ExchangeError> {
        let fields = self.execute(command, args)?;
        let (value, update) = decode(&fields)?;
        trace!("{}: applying {:?}", command.identifier, update);
        self.state.apply(update);
        Ok(value)
    }

    fn await_pair_ack(
        &mut self,
        command: &CommandDescriptor,
        expect: u16,
    ) -> Result<(), ExchangeError> {
        transition(command, ExchangeState::Sent, ExchangeState::AckPending);

        let ack = read_sentence(
            &mut self.transport,
            &mut self.rx,
            &self.config,
            ExchangePhase::Acknowledgement,
            &[PAIR_ACK_IDENTIFIER],
        )?;
        let (got, result) = decode_pair_ack(&ack)?;
        if got != expect {
            return Err(ExchangeError::AckMismatch { expect, got });
        }
        if result != AckResult::SentOk {
            warn!("{} rejected: {}", command.identifier, result);
            transition(command, ExchangeState::AckPending, ExchangeState::AckRejected);
            return Err(ExchangeError::Rejected {
                command: command.identifier,
                result,
            });
        }
        transition(command, ExchangeState::AckPending, ExchangeState::AckAccepted);
        Ok(())
    }

    fn await_query_result(
        &mut self,
        command: &CommandDescriptor,
        arity: Arity,
    ) -> Result<Vec<i64>, ExchangeError> {
        transition(command, ExchangeState::AckAccepted, ExchangeState::QueryPending);
        let parsing = self.config.field_parsing;
        let fields = read_sentence(
            &mut self.transport,
            &mut self.rx,
            &self.config,
            ExchangePhase::QueryResult,
            &[command.response_identifier],
        )
        .and_then(|sentence| decode_fields(&sentence, arity, parsing));
        match &fields {
            Ok(_) => transition(command, ExchangeState::QueryPending, ExchangeState::QueryAccepted),
            Err(_) => transition(command, ExchangeState::QueryPending, ExchangeState::QueryFailed),
        }
        fields
    }

    /// PQTM commands answer `<identifier>OK` or `<identifier>ERROR`. A get
    /// command may skip the `OK` and send its report straight away.
    fn await_pqtm_reply(&mut self, command: &CommandDescriptor) -> Result<Vec<i64>, ExchangeError> {
        transition(command, ExchangeState::Sent, ExchangeState::AckPending);
        let expected: &[&str] = match command.query {
            Some(_) => &[command.identifier, command.response_identifier],
            None => &[command.identifier],
        };
        let reply = read_sentence(
            &mut self.transport,
            &mut self.rx,
            &self.config,
            ExchangePhase::Acknowledgement,
            expected,
        )?;

        let identifier = reply.identifier();
        let suffix = identifier.strip_prefix(command.identifier);
        if suffix == Some(PQTM_ERROR_SUFFIX) {
            warn!("{} answered with ERROR", command.identifier);
            transition(command, ExchangeState::AckPending, ExchangeState::AckRejected);
            return Err(ExchangeError::DeviceError {
                identifier: command.identifier,
            });
        }

        match command.query {
            Some(arity) if identifier == command.response_identifier => {
                transition(command, ExchangeState::AckPending, ExchangeState::QueryPending);
                let fields = decode_fields(&reply, arity, self.config.field_parsing)?;
                transition(command, ExchangeState::QueryPending, ExchangeState::QueryAccepted);
                Ok(fields)
            },
            Some(arity) if suffix == Some(PQTM_OK_SUFFIX) => {
                transition(command, ExchangeState::AckPending, ExchangeState::AckAccepted);
                self.await_query_result(command, arity)
            },
            None if suffix == Some(PQTM_OK_SUFFIX) => {
                transition(command, ExchangeState::AckPending, ExchangeState::AckAccepted);
                Ok(Vec::new())
            },
            _ => Err(ExchangeError::MalformedAck),
        }
    }
}

fn transition(command: &CommandDescriptor, from: ExchangeState, to: ExchangeState) {
    trace!("{}: {:?} -> {:?}", command.identifier, from, to);
}

/// Reads until a sentence carrying one of `expected` arrives.
///
/// Well-framed sentences with another identifier are dropped while the
/// configured unsolicited budget lasts; anything else is validated against
/// the first expected identifier so the failure is reported precisely.
fn read_sentence<'b, T: Transport>(
    transport: &mut T,
    rx: &'b mut Vec<u8>,
    config: &DriverConfig,
    phase: ExchangePhase,
    expected: &[&str],
) -> Result<SentenceRef<'b>, ExchangeError> {
    let mut skipped = 0;
    loop {
        rx.clear();
        transport
            .read(rx)
            .map_err(|source| ExchangeError::ReadFailed { phase, source })?;
        if log::log_enabled!(log::Level::Debug) {
            debug!("<- {}", String::from_utf8_lossy(rx).trim_end());
        }

        let unsolicited = rx.first() == Some(&b'$')
            && !expected.iter().any(|id| rx.starts_with(id.as_bytes()));
        if !unsolicited || skipped >= config.max_unsolicited {
            break;
        }
        skipped += 1;
        warn!(
            "discarding unsolicited sentence while waiting for {} ({}/{})",
            phase, skipped, config.max_unsolicited
        );
    }

    let rx: &'b [u8] = rx;
    let identifier = expected
        .iter()
        .find(|id| rx.starts_with(id.as_bytes()))
        .or(expected.first())
        .copied()
        .unwrap_or_default();
    validate(identifier, rx, config.verify_checksum)
        .map_err(|source| ExchangeError::InvalidSentence { phase, source })
}

/// `$PAIR001,<Command_ID>,<Result>`
fn decode_pair_ack(ack: &SentenceRef<'_>) -> Result<(u16, AckResult), ExchangeError> {
    let mut tokens = ack.tokens();
    let (Some(command), Some(result), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ExchangeError::MalformedAck);
    };
    let command = command.parse().map_err(|_| ExchangeError::MalformedAck)?;
    let result = result
        .parse()
        .ok()
        .and_then(AckResult::from_code)
        .ok_or(ExchangeError::MalformedAck)?;
    Ok((command, result))
}

fn decode_fields(
    sentence: &SentenceRef<'_>,
    arity: Arity,
    parsing: FieldParsing,
) -> Result<Vec<i64>, ExchangeError> {
    let got = sentence.field_count();
    if !arity.contains(got) {
        return Err(ExchangeError::FieldCount {
            expect_min: arity.min,
            expect_max: arity.max,
            got,
        });
    }
    let fields = match parsing {
        FieldParsing::Lenient => sentence.fields(got),
        FieldParsing::Strict => sentence.try_fields(got)?,
    };
    debug!("{}: fields {:?}", sentence.identifier(), fields);
    Ok(fields)
}

/// Rejects a caller supplied value before anything is sent
pub(crate) fn check_range(
    parameter: &'static str,
    value: i64,
    range: RangeInclusive<i64>,
) -> Result<(), ExchangeError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ExchangeError::OutOfRange { parameter, value })
    }
}

/// Field `index` of a query result whose shape was already checked
pub(crate) fn field_at(fields: &[i64], index: usize) -> Result<i64, ExchangeError> {
    fields.get(index).copied().ok_or(ExchangeError::FieldCount {
        expect_min: index + 1,
        expect_max: index + 1,
        got: fields.len(),
    })
}

pub(crate) fn narrow<N: TryFrom<i64>>(
    parameter: &'static str,
    value: i64,
) -> Result<N, ExchangeError> {
    N::try_from(value).map_err(|_| ExchangeError::UnexpectedValue { parameter, value })
}

pub(crate) fn flag(parameter: &'static str, value: i64) -> Result<bool, ExchangeError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ExchangeError::UnexpectedValue { parameter, value }),
    }
}

pub(crate) const fn flag_arg(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}
