//! Command descriptors for every sentence the driver issues.
//!
//! A descriptor fixes the identifier, how many arguments the command
//! sentence carries, how the receiver acknowledges it and, for get commands,
//! the shape of the query result.

use core::fmt;

use crate::constants::PAIR_FAMILY_PREFIX;

code_enum! {
    /// `<Result>` field of `$PAIR001`
    pub enum AckResult {
        SentOk = 0,
        /// The command is being processed, a result follows later
        Processing = 1,
        SendFailed = 2,
        IdUnsupported = 3,
        /// Out of range or missing parameters, or a bad checksum
        ParameterError = 4,
        ServiceBusy = 5,
    }
}

impl fmt::Display for AckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AckResult::SentOk => "command sent successfully",
            AckResult::Processing => "command is being processed",
            AckResult::SendFailed => "command sending failed",
            AckResult::IdUnsupported => "command id not supported",
            AckResult::ParameterError => "command parameter error",
            AckResult::ServiceBusy => "service is busy",
        };
        f.write_str(msg)
    }
}

/// How a command is acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckKind {
    /// Generic `$PAIR001,<Command_ID>,<Result>`
    Pair,
    /// `<identifier>OK` / `<identifier>ERROR`
    Pqtm,
}

/// Accepted number of fields in a query result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Identifier including `$`
    pub identifier: &'static str,
    /// Arguments of the command sentence itself
    pub num_args: usize,
    /// Shape of the query result, `None` for set/action commands
    pub query: Option<Arity>,
    pub ack: AckKind,
    /// Identifier the query result is validated against
    pub response_identifier: &'static str,
}

impl CommandDescriptor {
    pub const fn set(identifier: &'static str, num_args: usize) -> Self {
        Self {
            identifier,
            num_args,
            query: None,
            ack: AckKind::Pair,
            response_identifier: identifier,
        }
    }

    pub const fn get(identifier: &'static str, num_args: usize, fields: Arity) -> Self {
        Self {
            identifier,
            num_args,
            query: Some(fields),
            ack: AckKind::Pair,
            response_identifier: identifier,
        }
    }

    pub const fn with_ack(self, ack: AckKind) -> Self {
        Self { ack, ..self }
    }

    pub const fn with_response(self, response_identifier: &'static str) -> Self {
        Self {
            response_identifier,
            ..self
        }
    }

    pub const fn is_query(&self) -> bool {
        self.query.is_some()
    }

    /// Numeric command id echoed in `$PAIR001`, e.g. `51` for `$PAIR051`
    pub fn pair_code(&self) -> Option<u16> {
        self.identifier
            .strip_prefix(PAIR_FAMILY_PREFIX)?
            .parse()
            .ok()
    }
}

pub const POWER_ON: CommandDescriptor = CommandDescriptor::set("$PAIR002", 0);
pub const POWER_OFF: CommandDescriptor = CommandDescriptor::set("$PAIR003", 0);
pub const HOT_START: CommandDescriptor = CommandDescriptor::set("$PAIR004", 0);
pub const WARM_START: CommandDescriptor = CommandDescriptor::set("$PAIR005", 0);
pub const COLD_START: CommandDescriptor = CommandDescriptor::set("$PAIR006", 0);
pub const FULL_COLD_START: CommandDescriptor = CommandDescriptor::set("$PAIR007", 0);

pub const SET_FIX_RATE: CommandDescriptor = CommandDescriptor::set("$PAIR050", 1);
pub const GET_FIX_RATE: CommandDescriptor =
    CommandDescriptor::get("$PAIR051", 0, Arity::exactly(1));
pub const SET_MIN_SNR: CommandDescriptor = CommandDescriptor::set("$PAIR058", 1);
pub const GET_MIN_SNR: CommandDescriptor =
    CommandDescriptor::get("$PAIR059", 0, Arity::exactly(1));
pub const SET_NMEA_OUTPUT_RATE: CommandDescriptor = CommandDescriptor::set("$PAIR062", 2);
pub const GET_NMEA_OUTPUT_RATE: CommandDescriptor =
    CommandDescriptor::get("$PAIR063", 1, Arity::exactly(2));
/// Five constellation enables and one reserved field
pub const SET_GNSS_SEARCH_MODE: CommandDescriptor = CommandDescriptor::set("$PAIR066", 6);
pub const GET_GNSS_SEARCH_MODE: CommandDescriptor =
    CommandDescriptor::get("$PAIR067", 0, Arity::exactly(6));
pub const SET_STATIC_THRESHOLD: CommandDescriptor = CommandDescriptor::set("$PAIR070", 1);
pub const GET_STATIC_THRESHOLD: CommandDescriptor =
    CommandDescriptor::get("$PAIR071", 0, Arity::exactly(1));
pub const SET_ELEVATION_MASK: CommandDescriptor = CommandDescriptor::set("$PAIR072", 1);
pub const GET_ELEVATION_MASK: CommandDescriptor =
    CommandDescriptor::get("$PAIR073", 0, Arity::exactly(1));
pub const SET_AIC: CommandDescriptor = CommandDescriptor::set("$PAIR074", 1);
pub const SET_NAVIGATION_MODE: CommandDescriptor = CommandDescriptor::set("$PAIR080", 1);
pub const GET_NAVIGATION_MODE: CommandDescriptor =
    CommandDescriptor::get("$PAIR081", 0, Arity::exactly(1));
pub const SET_DECIMAL_PRECISION: CommandDescriptor = CommandDescriptor::set("$PAIR098", 1);
pub const GET_DECIMAL_PRECISION: CommandDescriptor =
    CommandDescriptor::get("$PAIR099", 0, Arity::exactly(1));
pub const SET_NMEA_OUTPUT_MODE: CommandDescriptor = CommandDescriptor::set("$PAIR100", 2);
pub const SET_DUAL_BAND: CommandDescriptor = CommandDescriptor::set("$PAIR104", 1);
pub const GET_DUAL_BAND: CommandDescriptor =
    CommandDescriptor::get("$PAIR105", 0, Arity::exactly(1));
pub const SET_DGPS_MODE: CommandDescriptor = CommandDescriptor::set("$PAIR400", 1);
pub const GET_DGPS_MODE: CommandDescriptor =
    CommandDescriptor::get("$PAIR401", 0, Arity::exactly(1));
pub const SET_SBAS: CommandDescriptor = CommandDescriptor::set("$PAIR410", 1);
pub const GET_SBAS: CommandDescriptor = CommandDescriptor::get("$PAIR411", 0, Arity::exactly(1));
pub const SET_EASY: CommandDescriptor = CommandDescriptor::set("$PAIR490", 1);
/// Firmware versions differ in whether `<Status>` is present
pub const GET_EASY_STATUS: CommandDescriptor =
    CommandDescriptor::get("$PAIR491", 0, Arity::between(1, 2));
pub const SAVE_NVM: CommandDescriptor = CommandDescriptor::set("$PAIR513", 0);
pub const ENTER_RTC_MODE: CommandDescriptor = CommandDescriptor::set("$PAIR650", 1);
/// `<Port_Type>,<Port_Index>,<Baudrate>`
pub const SET_BAUD_RATE: CommandDescriptor = CommandDescriptor::set("$PAIR864", 3);
pub const GET_BAUD_RATE: CommandDescriptor =
    CommandDescriptor::get("$PAIR865", 2, Arity::exactly(1));

pub const SET_DR_CUSTOM_MESSAGE: CommandDescriptor = CommandDescriptor::set("$PAIR6010", 2);
pub const GET_DR_CUSTOM_MESSAGE: CommandDescriptor =
    CommandDescriptor::get("$PAIR6011", 1, Arity::exactly(2));

pub const INS_MESSAGE_CONFIG: &str = "$PQTMCFGEINSMSG";
pub const INS_MESSAGE_REPORT: &str = "$PQTMEINSMSG";
/// `1,<INS_Enabled>,<IMU_Enabled>,<GPS_Enabled>,<Rate>`
pub const SET_INS_MESSAGES: CommandDescriptor =
    CommandDescriptor::set(INS_MESSAGE_CONFIG, 5).with_ack(AckKind::Pqtm);
/// `0`, answered by `$PQTMEINSMSG,<Type>,<INS>,<IMU>,<GPS>,<Rate>`
pub const GET_INS_MESSAGES: CommandDescriptor =
    CommandDescriptor::get(INS_MESSAGE_CONFIG, 1, Arity::exactly(5))
        .with_ack(AckKind::Pqtm)
        .with_response(INS_MESSAGE_REPORT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_code() {
        assert_eq!(GET_FIX_RATE.pair_code(), Some(51));
        assert_eq!(SET_DR_CUSTOM_MESSAGE.pair_code(), Some(6010));
        assert_eq!(POWER_ON.pair_code(), Some(2));
        assert_eq!(SET_INS_MESSAGES.pair_code(), None);
    }

    #[test]
    fn test_query_shapes() {
        assert!(!SET_FIX_RATE.is_query());
        assert_eq!(GET_NMEA_OUTPUT_RATE.query, Some(Arity::exactly(2)));
        assert!(GET_EASY_STATUS.query.is_some_and(|a| a.contains(1) && a.contains(2)));
        assert_eq!(GET_INS_MESSAGES.response_identifier, "$PQTMEINSMSG");
        assert_eq!(GET_INS_MESSAGES.ack, AckKind::Pqtm);
    }

    #[test]
    fn test_ack_result_codes() {
        assert_eq!(AckResult::try_from(4), Ok(AckResult::ParameterError));
        assert!(AckResult::try_from(6).is_err());
        assert_eq!(AckResult::SentOk.code(), 0);
    }
}
