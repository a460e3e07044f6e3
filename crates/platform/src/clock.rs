//! Real-time clock, wall time and the tick callback contract.

use crate::settings::RtcTrim;

/// Local wall-clock time as shown on the idle face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Hour, `0..=23`
    pub hour: u8,
    /// Minute, `0..=59`
    pub minute: u8,
}

impl WallTime {
    /// Build a wall time, rejecting out-of-range fields.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Convert seconds since the Unix epoch plus a UTC offset into wall time.
    ///
    /// Returns `None` if the shifted timestamp would be negative.
    #[allow(clippy::arithmetic_side_effects)] // divisors are non-zero constants
    pub fn from_unix(secs: u64, utc_offset_secs: i32) -> Option<Self> {
        let shifted = i64::try_from(secs).ok()?.checked_add(i64::from(utc_offset_secs))?;
        let of_day = u64::try_from(shifted).ok()? % 86_400;
        let hour = u8::try_from(of_day / 3_600).ok()?;
        let minute = u8::try_from((of_day % 3_600) / 60).ok()?;
        Self::new(hour, minute)
    }

    /// Hour on a 12-hour dial (`1..=12`) and whether it is afternoon.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn twelve_hour(self) -> (u8, bool) {
        let pm = self.hour >= 12;
        let h = self.hour % 12;
        (if h == 0 { 12 } else { h }, pm)
    }
}

/// Process-wide clock state rendered by the idle face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    /// Hour, `0..=23`
    pub hour: u8,
    /// Minute, `0..=59`
    pub minute: u8,
    /// Show a 24-hour dial instead of AM/PM
    pub twenty_four: bool,
    /// Alarm armed indicator
    pub alarm_armed: bool,
}

impl ClockState {
    /// Midnight, 12-hour dial, alarm off.
    pub const fn new(twenty_four: bool) -> Self {
        Self { hour: 0, minute: 0, twenty_four, alarm_armed: false }
    }

    /// Copy the time fields from `now`.
    pub fn set_time(&mut self, now: WallTime) {
        self.hour = now.hour;
        self.minute = now.minute;
    }
}

/// Which of the two RTC alarms fired on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmFlags {
    /// Alarm 0 matched
    pub alarm0: bool,
    /// Alarm 1 matched
    pub alarm1: bool,
}

/// Receiver of the RTC tick.
///
/// Called from the RTC interrupt bottom half, concurrently with the menu
/// task. Implementations must only take short critical sections.
/// `now` is `None` when the driver could not read or convert the time.
pub trait TickHandler: Sync {
    /// Handle one tick (about once a minute, possibly more often).
    fn on_tick(&self, alarms: AlarmFlags, now: Option<WallTime>);
}

/// RTC driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// The RTC did not answer on the bus
    #[error("RTC not responding")]
    NotResponding,
    /// The RTC holds no valid time (battery lost)
    #[error("RTC time not set")]
    TimeNotSet,
    /// The driver does not support this operation
    #[error("RTC operation not supported")]
    Unsupported,
}

/// Real-time clock driver
pub trait Rtc {
    /// Read the current local time.
    fn now(&mut self) -> Result<WallTime, RtcError>;

    /// Apply a POSIX `TZ` rule to local time conversion.
    fn set_time_zone(&mut self, posix_tz: &str);

    /// Route the RTC calibration clock to the test point.
    fn start_calibration_output(&mut self) -> Result<(), RtcError>;

    /// Re-initialize the RTC from persisted settings, leaving calibration mode.
    fn reinit(&mut self, trim: RtcTrim) -> Result<(), RtcError>;
}

/// Network time synchronisation service
pub trait TimeSync {
    /// Hostname of the SNTP server currently in use, if any.
    fn server_name(&self) -> Option<&str>;

    /// Switch to a new SNTP server.
    fn set_server_name(&mut self, hostname: &str);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wall_time_rejects_out_of_range() {
        assert!(WallTime::new(24, 0).is_none());
        assert!(WallTime::new(0, 60).is_none());
        assert!(WallTime::new(23, 59).is_some());
    }

    #[test]
    fn wall_time_from_unix_applies_offset() {
        // 1970-01-02 01:30 UTC, shown at UTC-2
        let t = WallTime::from_unix(91_800, -7_200).unwrap();
        assert_eq!(t, WallTime { hour: 23, minute: 30 });
    }

    #[test]
    fn wall_time_from_unix_rejects_negative() {
        assert!(WallTime::from_unix(10, -3_600).is_none());
    }

    #[test]
    fn twelve_hour_dial() {
        assert_eq!(WallTime { hour: 0, minute: 0 }.twelve_hour(), (12, false));
        assert_eq!(WallTime { hour: 12, minute: 5 }.twelve_hour(), (12, true));
        assert_eq!(WallTime { hour: 17, minute: 5 }.twelve_hour(), (5, true));
    }
}
