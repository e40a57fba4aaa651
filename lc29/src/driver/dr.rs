//! Dead-reckoning message configuration

use alloc::string::ToString;

use super::{field_at, flag, flag_arg, Driver};
use crate::{
    commands,
    error::ExchangeError,
    state::{InsMessageConfig, StateUpdate},
    transport::Transport,
    types::{DrCustomMessage, InsOutputRate},
};

const PQTM_SET: &str = "1";
/// `<Type>` selecting every DR custom message at once
const DR_CUSTOM_MESSAGE_ALL: &str = "-1";
const PQTM_GET: &str = "0";

impl<T: Transport> Driver<T> {
    /// Enables or disables one of the `$PQTMVEHMSG`..`$PQTMVEHMOT` outputs.
    /// Takes effect after the configuration is saved and the receiver reset.
    pub fn set_dr_custom_message(
        &mut self,
        message: DrCustomMessage,
        enabled: bool,
    ) -> Result<(), ExchangeError> {
        let kind = message.code().to_string();
        self.execute_and_apply(
            &commands::SET_DR_CUSTOM_MESSAGE,
            &[kind.as_str(), flag_arg(enabled)],
            |_| Ok(((), StateUpdate::DrCustomMessage(message, enabled))),
        )
    }

    /// Restores the factory output state of every DR custom message
    pub fn reset_dr_custom_messages(&mut self) -> Result<(), ExchangeError> {
        self.execute_and_apply(
            &commands::SET_DR_CUSTOM_MESSAGE,
            &[DR_CUSTOM_MESSAGE_ALL, flag_arg(false)],
            |_| Ok(((), StateUpdate::DrCustomMessagesReset)),
        )
    }

    pub fn get_dr_custom_message(&mut self, message: DrCustomMessage) -> Result<bool, ExchangeError> {
        let kind = message.code().to_string();
        self.execute_and_apply(
            &commands::GET_DR_CUSTOM_MESSAGE,
            &[kind.as_str()],
            |fields| {
                let reported = field_at(fields, 0)?;
                if reported != message.code() {
                    return Err(ExchangeError::UnexpectedValue {
                        parameter: "dr_message_type",
                        value: reported,
                    });
                }
                let enabled = flag("dr_message_state", field_at(fields, 1)?)?;
                Ok((enabled, StateUpdate::DrCustomMessage(message, enabled)))
            },
        )
    }

    /// Configures the `$PQTMINS`, `$PQTMIMU` and `$PQTMGPS` outputs
    pub fn set_ins_messages(&mut self, config: InsMessageConfig) -> Result<(), ExchangeError> {
        let rate = config.rate.code().to_string();
        let args = [
            PQTM_SET,
            flag_arg(config.ins_enabled),
            flag_arg(config.imu_enabled),
            flag_arg(config.gps_enabled),
            rate.as_str(),
        ];
        self.execute_and_apply(&commands::SET_INS_MESSAGES, &args, |_| {
            Ok(((), StateUpdate::InsMessages(config)))
        })
    }

    pub fn get_ins_messages(&mut self) -> Result<InsMessageConfig, ExchangeError> {
        self.execute_and_apply(&commands::GET_INS_MESSAGES, &[PQTM_GET], |fields| {
            let rate = field_at(fields, 4)?;
            let config = InsMessageConfig {
                ins_enabled: flag("ins_enabled", field_at(fields, 1)?)?,
                imu_enabled: flag("imu_enabled", field_at(fields, 2)?)?,
                gps_enabled: flag("gps_enabled", field_at(fields, 3)?)?,
                rate: InsOutputRate::from_code(rate).ok_or(ExchangeError::UnexpectedValue {
                    parameter: "ins_rate",
                    value: rate,
                })?,
            };
            Ok((config, StateUpdate::InsMessages(config)))
        })
    }
}
