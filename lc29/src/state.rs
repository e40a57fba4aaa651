use crate::types::{
    Constellations, DecimalPrecision, DgpsMode, DrCustomMessage, DualBandStatus, EasyStatus, InsOutputRate,
    NavigationMode, NmeaOutputMode, NmeaSentence,
};

pub const DEFAULT_FIX_RATE_MS: u32 = 1000;
pub const DEFAULT_MIN_SNR: u8 = 9;
pub const DEFAULT_NMEA_OUTPUT_RATE: u8 = 1;
pub const DEFAULT_ELEVATION_MASK: i8 = 5;
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Only `$PQTMIMUTYPE` is output out of the box
pub const DEFAULT_DR_CUSTOM_MESSAGES: [bool; 5] = [false, false, false, true, false];

/// Enable flags and rate of the `$PQTMINS`/`$PQTMIMU`/`$PQTMGPS` messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsMessageConfig {
    pub ins_enabled: bool,
    pub imu_enabled: bool,
    pub gps_enabled: bool,
    pub rate: InsOutputRate,
}

impl InsMessageConfig {
    /// `$PQTMINS` is capped at 10 Hz
    pub fn ins_rate_hz(&self) -> u32 {
        self.rate.hz().min(10)
    }

    pub fn imu_rate_hz(&self) -> u32 {
        self.rate.hz()
    }

    /// `$PQTMGPS` always runs at 1 Hz
    pub fn gps_rate_hz(&self) -> u32 {
        1
    }
}

impl Default for InsMessageConfig {
    fn default() -> Self {
        Self {
            ins_enabled: false,
            imu_enabled: false,
            gps_enabled: false,
            rate: InsOutputRate::Hz1,
        }
    }
}

/// Last configuration confirmed by the receiver.
///
/// Starts from the factory defaults and only changes after an exchange has
/// been fully validated. Mutation is reserved to [`Driver`](crate::Driver).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverState {
    fix_rate_ms: u32,
    min_snr: u8,
    nmea_output_rates: [u8; 6],
    constellations: Constellations,
    static_threshold: u8,
    elevation_mask: i8,
    aic_enabled: bool,
    navigation_mode: NavigationMode,
    decimal_precision: DecimalPrecision,
    nmea_output_mode: NmeaOutputMode,
    proprietary_output: bool,
    dual_band: DualBandStatus,
    dgps_mode: DgpsMode,
    sbas_enabled: bool,
    easy_enabled: bool,
    easy_status: Option<EasyStatus>,
    rtc_wakeup_secs: u32,
    baud_rate: u32,
    ins_messages: InsMessageConfig,
    dr_custom_messages: [bool; 5],
}

impl Default for DriverState {
    fn default() -> Self {
        Self {
            fix_rate_ms: DEFAULT_FIX_RATE_MS,
            min_snr: DEFAULT_MIN_SNR,
            nmea_output_rates: [DEFAULT_NMEA_OUTPUT_RATE; 6],
            constellations: Constellations::all(),
            static_threshold: 0,
            elevation_mask: DEFAULT_ELEVATION_MASK,
            aic_enabled: true,
            navigation_mode: NavigationMode::Normal,
            decimal_precision: DecimalPrecision::LatLon6Alt3,
            nmea_output_mode: NmeaOutputMode::Nmea410,
            proprietary_output: false,
            dual_band: DualBandStatus::Enabled,
            dgps_mode: DgpsMode::Sbas,
            sbas_enabled: true,
            easy_enabled: true,
            easy_status: None,
            rtc_wakeup_secs: 0,
            baud_rate: DEFAULT_BAUD_RATE,
            ins_messages: InsMessageConfig::default(),
            dr_custom_messages: DEFAULT_DR_CUSTOM_MESSAGES,
        }
    }
}

/// One confirmed change, carrying every field a single command touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateUpdate {
    FixRate(u32),
    MinSnr(u8),
    NmeaOutputRate(NmeaSentence, u8),
    Constellations(Constellations),
    StaticThreshold(u8),
    ElevationMask(i8),
    Aic(bool),
    NavigationMode(NavigationMode),
    DecimalPrecision(DecimalPrecision),
    NmeaOutputMode {
        mode: NmeaOutputMode,
        proprietary: bool,
    },
    DualBand(DualBandStatus),
    DgpsMode(DgpsMode),
    Sbas(bool),
    /// `status: None` keeps the last known status
    Easy {
        enabled: bool,
        status: Option<EasyStatus>,
    },
    RtcWakeup(u32),
    BaudRate(u32),
    InsMessages(InsMessageConfig),
    DrCustomMessage(DrCustomMessage, bool),
    DrCustomMessagesReset,
}

impl DriverState {
    pub(crate) fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::FixRate(ms) => self.fix_rate_ms = ms,
            StateUpdate::MinSnr(snr) => self.min_snr = snr,
            StateUpdate::NmeaOutputRate(sentence, rate) => {
                self.nmea_output_rates[sentence.index()] = rate
            },
            StateUpdate::Constellations(mask) => self.constellations = mask,
            StateUpdate::StaticThreshold(dms) => self.static_threshold = dms,
            StateUpdate::ElevationMask(deg) => self.elevation_mask = deg,
            StateUpdate::Aic(enabled) => self.aic_enabled = enabled,
            StateUpdate::NavigationMode(mode) => self.navigation_mode = mode,
            StateUpdate::DecimalPrecision(precision) => self.decimal_precision = precision,
            StateUpdate::NmeaOutputMode { mode, proprietary } => {
                self.nmea_output_mode = mode;
                self.proprietary_output = proprietary;
            },
            StateUpdate::DualBand(status) => self.dual_band = status,
            StateUpdate::DgpsMode(mode) => self.dgps_mode = mode,
            StateUpdate::Sbas(enabled) => self.sbas_enabled = enabled,
            StateUpdate::Easy { enabled, status } => {
                self.easy_enabled = enabled;
                if status.is_some() {
                    self.easy_status = status;
                }
            },
            StateUpdate::RtcWakeup(secs) => self.rtc_wakeup_secs = secs,
            StateUpdate::BaudRate(baud) => self.baud_rate = baud,
            StateUpdate::InsMessages(config) => self.ins_messages = config,
            StateUpdate::DrCustomMessage(message, enabled) => {
                self.dr_custom_messages[message.index()] = enabled
            },
            StateUpdate::DrCustomMessagesReset => {
                self.dr_custom_messages = DEFAULT_DR_CUSTOM_MESSAGES
            },
        }
    }

    /// Position fix interval in milliseconds
    pub fn fix_rate_ms(&self) -> u32 {
        self.fix_rate_ms
    }

    /// Minimum satellite SNR in dB-Hz
    pub fn min_snr(&self) -> u8 {
        self.min_snr
    }

    /// Output once every n fixes, 0 when disabled
    pub fn nmea_output_rate(&self, sentence: NmeaSentence) -> u8 {
        self.nmea_output_rates[sentence.index()]
    }

    pub fn constellations(&self) -> Constellations {
        self.constellations
    }

    /// Static navigation speed threshold in dm/s
    pub fn static_threshold(&self) -> u8 {
        self.static_threshold
    }

    /// Elevation mask in degrees
    pub fn elevation_mask(&self) -> i8 {
        self.elevation_mask
    }

    pub fn aic_enabled(&self) -> bool {
        self.aic_enabled
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        self.navigation_mode
    }

    pub fn decimal_precision(&self) -> DecimalPrecision {
        self.decimal_precision
    }

    pub fn nmea_output_mode(&self) -> NmeaOutputMode {
        self.nmea_output_mode
    }

    pub fn proprietary_output(&self) -> bool {
        self.proprietary_output
    }

    /// True unless dual band is disabled; a critical status still counts as enabled
    pub fn dual_band_enabled(&self) -> bool {
        self.dual_band.is_enabled()
    }

    pub fn dual_band_status(&self) -> DualBandStatus {
        self.dual_band
    }

    pub fn dgps_mode(&self) -> DgpsMode {
        self.dgps_mode
    }

    pub fn sbas_enabled(&self) -> bool {
        self.sbas_enabled
    }

    pub fn easy_enabled(&self) -> bool {
        self.easy_enabled
    }

    /// `None` until the receiver has reported it
    pub fn easy_status(&self) -> Option<EasyStatus> {
        self.easy_status
    }

    /// Wake-up delay of the last RTC low-power request, 0 for wake on signal
    pub fn rtc_wakeup_secs(&self) -> u32 {
        self.rtc_wakeup_secs
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn ins_messages(&self) -> InsMessageConfig {
        self.ins_messages
    }

    pub fn dr_custom_message_enabled(&self, message: DrCustomMessage) -> bool {
        self.dr_custom_messages[message.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_defaults() {
        let state = DriverState::default();
        assert_eq!(state.fix_rate_ms(), 1000);
        assert_eq!(state.min_snr(), 9);
        for sentence in NmeaSentence::ALL {
            assert_eq!(state.nmea_output_rate(*sentence), 1);
        }
        assert_eq!(state.constellations(), Constellations::all());
        assert_eq!(state.elevation_mask(), 5);
        assert_eq!(state.navigation_mode(), NavigationMode::Normal);
        assert_eq!(state.decimal_precision().code(), 2);
        assert_eq!(state.dual_band_status(), DualBandStatus::Enabled);
        assert_eq!(state.baud_rate(), 115_200);
        assert_eq!(state.ins_messages(), InsMessageConfig::default());
        for message in DrCustomMessage::ALL {
            assert_eq!(
                state.dr_custom_message_enabled(*message),
                *message == DrCustomMessage::ImuType
            );
        }
        assert_eq!(state.easy_status(), None);
    }

    #[test]
    fn test_apply_touches_only_its_fields() {
        let mut state = DriverState::default();
        state.apply(StateUpdate::NmeaOutputRate(NmeaSentence::Gsv, 0));
        assert_eq!(state.nmea_output_rate(NmeaSentence::Gsv), 0);
        assert_eq!(state.nmea_output_rate(NmeaSentence::Gga), 1);

        let mut expected = DriverState::default();
        expected.nmea_output_rates[NmeaSentence::Gsv.index()] = 0;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_apply_dr_custom_messages_reset() {
        let mut state = DriverState::default();
        state.apply(StateUpdate::DrCustomMessage(DrCustomMessage::VehMsg, true));
        state.apply(StateUpdate::DrCustomMessage(DrCustomMessage::ImuType, false));
        state.apply(StateUpdate::DrCustomMessagesReset);
        assert_eq!(state, DriverState::default());
    }

    #[test]
    fn test_apply_easy_keeps_unknown_status() {
        let mut state = DriverState::default();
        state.apply(StateUpdate::Easy {
            enabled: true,
            status: Some(EasyStatus::Finished2Day),
        });
        state.apply(StateUpdate::Easy {
            enabled: false,
            status: None,
        });
        assert!(!state.easy_enabled());
        assert_eq!(state.easy_status(), Some(EasyStatus::Finished2Day));
    }

    #[test]
    fn test_ins_rates() {
        let config = InsMessageConfig {
            ins_enabled: true,
            imu_enabled: true,
            gps_enabled: true,
            rate: InsOutputRate::Hz50,
        };
        assert_eq!(config.ins_rate_hz(), 10);
        assert_eq!(config.imu_rate_hz(), 50);
        assert_eq!(config.gps_rate_hz(), 1);
    }
}
