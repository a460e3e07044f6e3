//! Persisted user settings.
//!
//! Storage is synchronous (NVS / flash key-value on hardware, a JSON file on
//! the simulator). Every accessor reports success or failure; callers on the
//! menu side treat failure as "leave the value unchanged".

use alloc::string::String;

use crate::clock::WallTime;

/// Settings store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// No value stored under this key
    #[error("setting not found")]
    NotFound,
    /// Stored value could not be decoded
    #[error("setting is corrupt")]
    Corrupt,
    /// Backing store rejected the write
    #[error("settings write failed")]
    WriteFailed,
}

/// Digital trim applied to the RTC oscillator.
///
/// Packed the way the RTC register stores it: bit 7 selects add (1) or
/// subtract (0), bits 0..=6 hold the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcTrim {
    /// Coarse trim (128 times per second) instead of fine (once per minute)
    pub coarse: bool,
    raw: u8,
}

impl RtcTrim {
    /// Bit 7: add clock cycles instead of subtracting them.
    pub const ADD_BIT: u8 = 0x80;
    /// Largest trim magnitude.
    pub const MAX_VALUE: u8 = 0x7F;

    /// Trimming disabled, stored as fine/zero.
    pub const DISABLED: Self = Self { coarse: false, raw: 0 };

    /// Build from the packed register byte.
    pub const fn from_raw(coarse: bool, raw: u8) -> Self {
        Self { coarse, raw }
    }

    /// Build from parts; `value` is masked to `0..=127`.
    pub const fn new(coarse: bool, add: bool, value: u8) -> Self {
        let sign = if add { Self::ADD_BIT } else { 0 };
        Self { coarse, raw: sign | (value & Self::MAX_VALUE) }
    }

    /// Packed register byte.
    pub const fn raw(self) -> u8 {
        self.raw
    }

    /// Whether cycles are added (`true`) or subtracted.
    pub const fn add(self) -> bool {
        self.raw & Self::ADD_BIT == Self::ADD_BIT
    }

    /// Trim magnitude, `0..=127`.
    pub const fn value(self) -> u8 {
        self.raw & Self::MAX_VALUE
    }

    /// A zero magnitude disables trimming regardless of the other bits.
    pub const fn is_disabled(self) -> bool {
        self.value() == 0
    }

    /// Canonical form for storage: disabled trims collapse to [`Self::DISABLED`].
    pub const fn normalized(self) -> Self {
        if self.is_disabled() {
            Self::DISABLED
        } else {
            self
        }
    }

    /// Clock cycles added or removed per trim event.
    #[allow(clippy::arithmetic_side_effects)] // value <= 127, product fits u16
    pub const fn cycles(self) -> u16 {
        self.value() as u16 * 2
    }
}

/// Persisted settings store
pub trait Settings {
    /// Stored alarm time.
    fn alarm_time(&self) -> Result<WallTime, SettingsError>;

    /// Store the alarm time.
    fn set_alarm_time(&mut self, time: WallTime) -> Result<(), SettingsError>;

    /// Stored time format, `true` for 24-hour.
    fn time_format(&self) -> Result<bool, SettingsError>;

    /// Store the time format.
    fn set_time_format(&mut self, twenty_four: bool) -> Result<(), SettingsError>;

    /// Stored time zone name (e.g. `America/New_York`).
    fn time_zone(&self) -> Result<String, SettingsError>;

    /// Store the time zone name.
    fn set_time_zone(&mut self, zone: &str) -> Result<(), SettingsError>;

    /// Stored NTP server hostname.
    fn ntp_server(&self) -> Result<String, SettingsError>;

    /// Store the NTP server hostname.
    fn set_ntp_server(&mut self, hostname: &str) -> Result<(), SettingsError>;

    /// Stored RTC trim.
    fn rtc_trim(&self) -> Result<RtcTrim, SettingsError>;

    /// Store the RTC trim.
    fn set_rtc_trim(&mut self, trim: RtcTrim) -> Result<(), SettingsError>;
}

#[cfg(test)]
mod tests {
    use super::RtcTrim;

    #[test]
    fn trim_packs_sign_and_magnitude() {
        let trim = RtcTrim::new(true, true, 5);
        assert_eq!(trim.raw(), 0x85);
        assert!(trim.add());
        assert_eq!(trim.value(), 5);
        assert_eq!(trim.cycles(), 10);
    }

    #[test]
    fn trim_masks_magnitude() {
        let trim = RtcTrim::new(false, false, 0xFF);
        assert_eq!(trim.value(), 127);
        assert!(!trim.add());
    }

    #[test]
    fn disabled_trim_normalizes_to_fine_zero() {
        let trim = RtcTrim::new(true, true, 0);
        assert!(trim.is_disabled());
        assert_eq!(trim.normalized(), RtcTrim::DISABLED);
    }
}
