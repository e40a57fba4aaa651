//! Typed PAIR commands

use alloc::string::ToString;

use super::{check_range, field_at, flag, flag_arg, narrow, Driver};
use crate::{
    commands::{self, CommandDescriptor},
    error::ExchangeError,
    state::StateUpdate,
    transport::Transport,
    types::{
        Constellations, DecimalPrecision, DgpsMode, DualBandStatus, EasyStatus, NavigationMode, NmeaOutputMode,
        NmeaSentence, RestartKind,
    },
};

/// UART rates accepted by `$PAIR864`
pub const SUPPORTED_BAUD_RATES: [u32; 7] = [4800, 9600, 19200, 38400, 57600, 115_200, 921_600];

const UART_PORT_TYPE: &str = "0";
const UART_PORT_INDEX: &str = "0";

/// Longest RTC low-power period, 720 days
const RTC_MAX_WAKEUP_SECS: i64 = 62_208_000;

fn unexpected(parameter: &'static str, value: i64) -> ExchangeError {
    ExchangeError::UnexpectedValue { parameter, value }
}

impl<T: Transport> Driver<T> {
    fn action(&mut self, command: &CommandDescriptor) -> Result<(), ExchangeError> {
        self.execute(command, &[]).map(|_| ())
    }

    /// Powers the GNSS subsystem on
    pub fn power_on(&mut self) -> Result<(), ExchangeError> {
        self.action(&commands::POWER_ON)
    }

    pub fn power_off(&mut self) -> Result<(), ExchangeError> {
        self.action(&commands::POWER_OFF)
    }

    pub fn restart(&mut self, kind: RestartKind) -> Result<(), ExchangeError> {
        let command = match kind {
            RestartKind::Hot => &commands::HOT_START,
            RestartKind::Warm => &commands::WARM_START,
            RestartKind::Cold => &commands::COLD_START,
            RestartKind::FullCold => &commands::FULL_COLD_START,
        };
        self.action(command)
    }

    /// Persists the current receiver configuration to flash
    pub fn save_to_nvm(&mut self) -> Result<(), ExchangeError> {
        self.action(&commands::SAVE_NVM)
    }

    /// Position fix interval, 100 to 1000 ms
    pub fn set_fix_rate(&mut self, interval_ms: u32) -> Result<(), ExchangeError> {
        check_range("fix_rate_ms", interval_ms.into(), 100..=1000)?;
        let arg = interval_ms.to_string();
        self.execute_and_apply(&commands::SET_FIX_RATE, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::FixRate(interval_ms)))
        })
    }

    pub fn get_fix_rate(&mut self) -> Result<u32, ExchangeError> {
        self.execute_and_apply(&commands::GET_FIX_RATE, &[], |fields| {
            let ms = narrow("fix_rate_ms", field_at(fields, 0)?)?;
            Ok((ms, StateUpdate::FixRate(ms)))
        })
    }

    /// Minimum SNR of satellites used in the solution, 9 to 37 dB-Hz
    pub fn set_min_snr(&mut self, snr: u8) -> Result<(), ExchangeError> {
        check_range("min_snr", snr.into(), 9..=37)?;
        let arg = snr.to_string();
        self.execute_and_apply(&commands::SET_MIN_SNR, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::MinSnr(snr)))
        })
    }

    pub fn get_min_snr(&mut self) -> Result<u8, ExchangeError> {
        self.execute_and_apply(&commands::GET_MIN_SNR, &[], |fields| {
            let snr = narrow("min_snr", field_at(fields, 0)?)?;
            Ok((snr, StateUpdate::MinSnr(snr)))
        })
    }

    /// Output `sentence` once every `rate` fixes, 0 disables it. Range 0 to 20.
    pub fn set_nmea_output_rate(
        &mut self,
        sentence: NmeaSentence,
        rate: u8,
    ) -> Result<(), ExchangeError> {
        check_range("nmea_output_rate", rate.into(), 0..=20)?;
        let kind = sentence.code().to_string();
        let arg = rate.to_string();
        self.execute_and_apply(
            &commands::SET_NMEA_OUTPUT_RATE,
            &[kind.as_str(), arg.as_str()],
            |_| Ok(((), StateUpdate::NmeaOutputRate(sentence, rate))),
        )
    }

    pub fn get_nmea_output_rate(&mut self, sentence: NmeaSentence) -> Result<u8, ExchangeError> {
        let kind = sentence.code().to_string();
        self.execute_and_apply(&commands::GET_NMEA_OUTPUT_RATE, &[kind.as_str()], |fields| {
            let reported = field_at(fields, 0)?;
            if reported != sentence.code() {
                return Err(unexpected("nmea_type", reported));
            }
            let rate = narrow("nmea_output_rate", field_at(fields, 1)?)?;
            Ok((rate, StateUpdate::NmeaOutputRate(sentence, rate)))
        })
    }

    /// Selects the constellations to search. At least one must be set.
    pub fn set_gnss_search_mode(
        &mut self,
        constellations: Constellations,
    ) -> Result<(), ExchangeError> {
        if constellations.is_empty() {
            return Err(ExchangeError::OutOfRange {
                parameter: "constellations",
                value: 0,
            });
        }
        let [gps, glonass, galileo, beidou, qzss] = constellations.enable_args();
        let args = [gps, glonass, galileo, beidou, qzss, "0"];
        self.execute_and_apply(&commands::SET_GNSS_SEARCH_MODE, &args, |_| {
            Ok(((), StateUpdate::Constellations(constellations)))
        })
    }

    pub fn get_gnss_search_mode(&mut self) -> Result<Constellations, ExchangeError> {
        self.execute_and_apply(&commands::GET_GNSS_SEARCH_MODE, &[], |fields| {
            let mask = Constellations::from_enable_fields(fields).ok_or_else(|| {
                let bad = fields.iter().copied().find(|v| !matches!(v, 0 | 1));
                unexpected("constellations", bad.unwrap_or_default())
            })?;
            Ok((mask, StateUpdate::Constellations(mask)))
        })
    }

    /// Speed threshold for static navigation, 0 to 20 dm/s (0 disables)
    pub fn set_static_threshold(&mut self, threshold_dms: u8) -> Result<(), ExchangeError> {
        check_range("static_threshold", threshold_dms.into(), 0..=20)?;
        let arg = threshold_dms.to_string();
        self.execute_and_apply(&commands::SET_STATIC_THRESHOLD, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::StaticThreshold(threshold_dms)))
        })
    }

    pub fn get_static_threshold(&mut self) -> Result<u8, ExchangeError> {
        self.execute_and_apply(&commands::GET_STATIC_THRESHOLD, &[], |fields| {
            let threshold = narrow("static_threshold", field_at(fields, 0)?)?;
            Ok((threshold, StateUpdate::StaticThreshold(threshold)))
        })
    }

    /// Satellites below this elevation are ignored, -90 to 90 degrees
    pub fn set_elevation_mask(&mut self, degrees: i8) -> Result<(), ExchangeError> {
        check_range("elevation_mask", degrees.into(), -90..=90)?;
        let arg = degrees.to_string();
        self.execute_and_apply(&commands::SET_ELEVATION_MASK, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::ElevationMask(degrees)))
        })
    }

    pub fn get_elevation_mask(&mut self) -> Result<i8, ExchangeError> {
        self.execute_and_apply(&commands::GET_ELEVATION_MASK, &[], |fields| {
            let degrees = narrow("elevation_mask", field_at(fields, 0)?)?;
            Ok((degrees, StateUpdate::ElevationMask(degrees)))
        })
    }

    /// Active interference cancellation
    pub fn set_aic(&mut self, enabled: bool) -> Result<(), ExchangeError> {
        self.execute_and_apply(&commands::SET_AIC, &[flag_arg(enabled)], |_| {
            Ok(((), StateUpdate::Aic(enabled)))
        })
    }

    pub fn set_navigation_mode(&mut self, mode: NavigationMode) -> Result<(), ExchangeError> {
        let arg = mode.code().to_string();
        self.execute_and_apply(&commands::SET_NAVIGATION_MODE, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::NavigationMode(mode)))
        })
    }

    pub fn get_navigation_mode(&mut self) -> Result<NavigationMode, ExchangeError> {
        self.execute_and_apply(&commands::GET_NAVIGATION_MODE, &[], |fields| {
            let code = field_at(fields, 0)?;
            let mode =
                NavigationMode::from_code(code).ok_or_else(|| unexpected("navigation_mode", code))?;
            Ok((mode, StateUpdate::NavigationMode(mode)))
        })
    }

    pub fn set_decimal_precision(
        &mut self,
        precision: DecimalPrecision,
    ) -> Result<(), ExchangeError> {
        let arg = precision.code().to_string();
        self.execute_and_apply(&commands::SET_DECIMAL_PRECISION, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::DecimalPrecision(precision)))
        })
    }

    pub fn get_decimal_precision(&mut self) -> Result<DecimalPrecision, ExchangeError> {
        self.execute_and_apply(&commands::GET_DECIMAL_PRECISION, &[], |fields| {
            let code = field_at(fields, 0)?;
            let precision = DecimalPrecision::from_code(code)
                .ok_or_else(|| unexpected("decimal_precision", code))?;
            Ok((precision, StateUpdate::DecimalPrecision(precision)))
        })
    }

    /// NMEA version of standard sentences and whether proprietary sentences are output
    pub fn set_nmea_output_mode(
        &mut self,
        mode: NmeaOutputMode,
        proprietary: bool,
    ) -> Result<(), ExchangeError> {
        let arg = mode.code().to_string();
        self.execute_and_apply(
            &commands::SET_NMEA_OUTPUT_MODE,
            &[arg.as_str(), flag_arg(proprietary)],
            |_| Ok(((), StateUpdate::NmeaOutputMode { mode, proprietary })),
        )
    }

    /// L1+L5 dual band reception
    pub fn set_dual_band(&mut self, enabled: bool) -> Result<(), ExchangeError> {
        self.execute_and_apply(&commands::SET_DUAL_BAND, &[flag_arg(enabled)], |_| {
            let status = if enabled {
                DualBandStatus::Enabled
            } else {
                DualBandStatus::Disabled
            };
            Ok(((), StateUpdate::DualBand(status)))
        })
    }

    pub fn get_dual_band(&mut self) -> Result<DualBandStatus, ExchangeError> {
        self.execute_and_apply(&commands::GET_DUAL_BAND, &[], |fields| {
            let code = field_at(fields, 0)?;
            let status =
                DualBandStatus::from_code(code).ok_or_else(|| unexpected("dual_band", code))?;
            Ok((status, StateUpdate::DualBand(status)))
        })
    }

    pub fn set_dgps_mode(&mut self, mode: DgpsMode) -> Result<(), ExchangeError> {
        let arg = mode.code().to_string();
        self.execute_and_apply(&commands::SET_DGPS_MODE, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::DgpsMode(mode)))
        })
    }

    pub fn get_dgps_mode(&mut self) -> Result<DgpsMode, ExchangeError> {
        self.execute_and_apply(&commands::GET_DGPS_MODE, &[], |fields| {
            let code = field_at(fields, 0)?;
            let mode = DgpsMode::from_code(code).ok_or_else(|| unexpected("dgps_mode", code))?;
            Ok((mode, StateUpdate::DgpsMode(mode)))
        })
    }

    pub fn set_sbas(&mut self, enabled: bool) -> Result<(), ExchangeError> {
        self.execute_and_apply(&commands::SET_SBAS, &[flag_arg(enabled)], |_| {
            Ok(((), StateUpdate::Sbas(enabled)))
        })
    }

    pub fn get_sbas(&mut self) -> Result<bool, ExchangeError> {
        self.execute_and_apply(&commands::GET_SBAS, &[], |fields| {
            let enabled = flag("sbas", field_at(fields, 0)?)?;
            Ok((enabled, StateUpdate::Sbas(enabled)))
        })
    }

    /// EASY orbit prediction
    pub fn set_easy(&mut self, enabled: bool) -> Result<(), ExchangeError> {
        self.execute_and_apply(&commands::SET_EASY, &[flag_arg(enabled)], |_| {
            Ok((
                (),
                StateUpdate::Easy {
                    enabled,
                    status: None,
                },
            ))
        })
    }

    /// EASY enable flag and, when the firmware reports it, extension progress
    pub fn get_easy_status(&mut self) -> Result<(bool, Option<EasyStatus>), ExchangeError> {
        self.execute_and_apply(&commands::GET_EASY_STATUS, &[], |fields| {
            let enabled = flag("easy", field_at(fields, 0)?)?;
            let status = match fields.get(1) {
                Some(&code) => {
                    Some(EasyStatus::from_code(code).ok_or_else(|| unexpected("easy_status", code))?)
                },
                None => None,
            };
            Ok(((enabled, status), StateUpdate::Easy { enabled, status }))
        })
    }

    /// Enters RTC low-power mode for `seconds`, 0 or 10 to 62208000.
    /// 0 keeps the receiver asleep until woken by its WAKEUP pin.
    pub fn enter_rtc_mode(&mut self, seconds: u32) -> Result<(), ExchangeError> {
        if seconds != 0 {
            check_range("rtc_wakeup_secs", seconds.into(), 10..=RTC_MAX_WAKEUP_SECS)?;
        }
        let arg = seconds.to_string();
        self.execute_and_apply(&commands::ENTER_RTC_MODE, &[arg.as_str()], |_| {
            Ok(((), StateUpdate::RtcWakeup(seconds)))
        })
    }

    /// Changes the UART0 baud rate.
    ///
    /// The receiver switches right after acknowledging; follow up with
    /// [`configure_transport`](Driver::configure_transport) before the next command.
    pub fn set_baud_rate(&mut self, baud: u32) -> Result<(), ExchangeError> {
        if !SUPPORTED_BAUD_RATES.contains(&baud) {
            return Err(ExchangeError::OutOfRange {
                parameter: "baud_rate",
                value: baud.into(),
            });
        }
        let arg = baud.to_string();
        self.execute_and_apply(
            &commands::SET_BAUD_RATE,
            &[UART_PORT_TYPE, UART_PORT_INDEX, arg.as_str()],
            |_| Ok(((), StateUpdate::BaudRate(baud))),
        )
    }

    pub fn get_baud_rate(&mut self) -> Result<u32, ExchangeError> {
        self.execute_and_apply(
            &commands::GET_BAUD_RATE,
            &[UART_PORT_TYPE, UART_PORT_INDEX],
            |fields| {
                let baud = narrow("baud_rate", field_at(fields, 0)?)?;
                Ok((baud, StateUpdate::BaudRate(baud)))
            },
        )
    }
}
