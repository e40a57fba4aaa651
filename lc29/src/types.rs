//! Typed values of LC29H configuration parameters

use bitflags::bitflags;
use core::fmt;

code_enum! {
    /// `$PAIR080` navigation mode
    pub enum NavigationMode {
        /// General purpose (factory default)
        Normal = 0,
        /// Low-speed movement weighs more in the position solution
        Fitness = 1,
        /// Zero dynamics assumed
        Stationary = 4,
        /// Smoothed trajectory for distance calculation
        Swimming = 7,
    }
}

code_enum! {
    /// `$PAIR098` decimal places of latitude/longitude and altitude
    pub enum DecimalPrecision {
        LatLon4Alt1 = 0,
        LatLon5Alt2 = 1,
        LatLon6Alt3 = 2,
        LatLon7Alt3 = 3,
    }
}

code_enum! {
    /// `$PAIR100` NMEA output format
    pub enum NmeaOutputMode {
        Disabled = 0,
        Nmea410 = 1,
        Nmea301 = 2,
    }
}

code_enum! {
    /// Standard sentence types selectable with `$PAIR062`/`$PAIR063`
    pub enum NmeaSentence {
        Gga = 0,
        Gll = 1,
        Gsa = 2,
        Gsv = 3,
        Rmc = 4,
        Vtg = 5,
    }
}

impl NmeaSentence {
    pub const fn index(self) -> usize {
        self.code() as usize
    }
}

impl fmt::Display for NmeaSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NmeaSentence::Gga => "GGA",
            NmeaSentence::Gll => "GLL",
            NmeaSentence::Gsa => "GSA",
            NmeaSentence::Gsv => "GSV",
            NmeaSentence::Rmc => "RMC",
            NmeaSentence::Vtg => "VTG",
        };
        f.write_str(name)
    }
}

code_enum! {
    /// `$PAIR400` differential correction source
    pub enum DgpsMode {
        NoSource = 0,
        Rtcm = 1,
        Sbas = 2,
    }
}

code_enum! {
    /// Progress of the EASY orbit extension as reported by `$PAIR491`
    pub enum EasyStatus {
        NotFinished = 0,
        Finished1Day = 1,
        Finished2Day = 2,
        Finished3Day = 3,
    }
}

code_enum! {
    /// `$PAIR105` dual band reception state
    pub enum DualBandStatus {
        Disabled = 0,
        Enabled = 1,
        /// Reported by the receiver only, cannot be set
        Critical = 3,
    }
}

impl DualBandStatus {
    pub const fn is_enabled(self) -> bool {
        !matches!(self, DualBandStatus::Disabled)
    }
}

code_enum! {
    /// Proprietary dead-reckoning sentences switched by `$PAIR6010`
    pub enum DrCustomMessage {
        VehMsg = 0,
        SenMsg = 1,
        DrCal = 2,
        ImuType = 3,
        VehMot = 4,
    }
}

impl DrCustomMessage {
    pub const fn index(self) -> usize {
        self.code() as usize
    }
}

code_enum! {
    /// Output rate of the `$PQTMINS`, `$PQTMIMU` and `$PQTMGPS` messages
    pub enum InsOutputRate {
        Hz1 = 1,
        Hz2 = 2,
        Hz4 = 4,
        Hz5 = 5,
        Hz10 = 10,
        Hz20 = 20,
        Hz50 = 50,
        Hz100 = 100,
    }
}

impl InsOutputRate {
    pub const fn hz(self) -> u32 {
        self.code() as u32
    }
}

/// `$PAIR004`..`$PAIR007`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestartKind {
    Hot,
    Warm,
    Cold,
    FullCold,
}

bitflags! {
    /// Constellations searched, in `$PAIR066` argument order
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Constellations: u8 {
        const GPS = 0x01;
        const GLONASS = 0x02;
        const GALILEO = 0x04;
        const BEIDOU = 0x08;
        const QZSS = 0x10;
    }
}

impl Constellations {
    /// Flags in the order the receiver expects them
    pub const ORDER: [Constellations; 5] = [
        Constellations::GPS,
        Constellations::GLONASS,
        Constellations::GALILEO,
        Constellations::BEIDOU,
        Constellations::QZSS,
    ];

    /// Decodes the enable fields of a `$PAIR067` result. Values other than 0/1 are rejected.
    pub fn from_enable_fields(fields: &[i64]) -> Option<Self> {
        let mut mask = Constellations::empty();
        for (flag, value) in Self::ORDER.iter().zip(fields) {
            match value {
                0 => {},
                1 => mask |= *flag,
                _ => return None,
            }
        }
        Some(mask)
    }

    /// `"1"`/`"0"` per constellation
    pub fn enable_args(self) -> [&'static str; 5] {
        Self::ORDER.map(|flag| if self.contains(flag) { "1" } else { "0" })
    }
}
