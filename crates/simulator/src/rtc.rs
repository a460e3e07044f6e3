//! Host clock standing in for the RTC and the SNTP client.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use platform::{Rtc, RtcError, RtcTrim, TimeSync, WallTime};

/// Local time from the host clock shifted by the standard offset of the
/// selected POSIX time zone. Daylight saving rules are not applied.
///
/// Clones share the offset, so the tick task sees zone changes made from
/// the menu.
#[derive(Clone, Default)]
pub struct HostRtc {
    utc_offset: Arc<AtomicI32>,
    calibrating: bool,
    trim: RtcTrim,
}

impl HostRtc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utc_offset(&self) -> i32 {
        self.utc_offset.load(Ordering::Relaxed)
    }
}

fn unix_now() -> Result<Duration, RtcError> {
    SystemTime::now().duration_since(UNIX_EPOCH).map_err(|_| RtcError::TimeNotSet)
}

/// Time left until the next minute boundary of the host clock.
pub fn until_next_minute() -> Duration {
    let into_minute = unix_now().map_or(0, |now| now.as_secs() % 60);
    Duration::from_secs(60_u64.saturating_sub(into_minute))
}

impl Rtc for HostRtc {
    fn now(&mut self) -> Result<WallTime, RtcError> {
        WallTime::from_unix(unix_now()?.as_secs(), self.utc_offset()).ok_or(RtcError::TimeNotSet)
    }

    fn set_time_zone(&mut self, posix_tz: &str) {
        match posix_utc_offset(posix_tz) {
            Some(offset) => {
                tracing::info!(tz = posix_tz, offset, "time zone applied");
                self.utc_offset.store(offset, Ordering::Relaxed);
            }
            None => tracing::warn!(tz = posix_tz, "unparseable TZ rule"),
        }
    }

    fn start_calibration_output(&mut self) -> Result<(), RtcError> {
        self.calibrating = true;
        tracing::info!("calibration clock routed to the test point");
        Ok(())
    }

    fn reinit(&mut self, trim: RtcTrim) -> Result<(), RtcError> {
        if self.calibrating {
            tracing::info!("calibration clock stopped");
        }
        self.calibrating = false;
        if trim != self.trim {
            tracing::info!(coarse = trim.coarse, raw = trim.raw(), "RTC trim changed");
        }
        self.trim = trim;
        Ok(())
    }
}

/// UTC offset in seconds of the standard time of a POSIX `TZ` rule.
///
/// POSIX offsets count west of Greenwich, so `EST5EDT` gives `-18000`.
pub fn posix_utc_offset(tz: &str) -> Option<i32> {
    let rest = match tz.strip_prefix('<') {
        Some(quoted) => quoted.split_once('>')?.1,
        None => tz.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | ':')))
        .unwrap_or(rest.len());
    let offset = rest.get(..end)?;
    let (west, hms) = match offset.strip_prefix('-') {
        Some(hms) => (false, hms),
        None => (true, offset.strip_prefix('+').unwrap_or(offset)),
    };

    let mut secs = 0i32;
    let mut unit = 3600i32;
    for part in hms.split(':') {
        let value: i32 = part.parse().ok()?;
        secs = secs.checked_add(value.checked_mul(unit)?)?;
        unit = unit.checked_div(60)?;
    }
    if west {
        secs.checked_neg()
    } else {
        Some(secs)
    }
}

/// SNTP client stand-in; the host keeps its own time.
pub struct HostTimeSync {
    server: Option<String>,
}

impl Default for HostTimeSync {
    fn default() -> Self {
        Self { server: Some("pool.ntp.org".into()) }
    }
}

impl TimeSync for HostTimeSync {
    fn server_name(&self) -> Option<&str> {
        self.server.as_deref()
    }

    fn set_server_name(&mut self, hostname: &str) {
        tracing::info!(hostname, "SNTP server changed");
        self.server = Some(hostname.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_offsets() {
        assert_eq!(posix_utc_offset("EST5EDT,M3.2.0,M11.1.0"), Some(-5 * 3600));
        assert_eq!(posix_utc_offset("CET-1CEST,M3.5.0,M10.5.0/3"), Some(3600));
        assert_eq!(posix_utc_offset("IST-5:30"), Some(5 * 3600 + 30 * 60));
        assert_eq!(posix_utc_offset("<+0330>-3:30<+0430>"), Some(3 * 3600 + 30 * 60));
        assert_eq!(posix_utc_offset("UTC0"), Some(0));
        assert_eq!(posix_utc_offset("GMT"), None);
    }

    #[test]
    fn test_clones_share_the_zone() {
        let mut rtc = HostRtc::new();
        let ticker = rtc.clone();
        rtc.set_time_zone("JST-9");
        assert_eq!(ticker.utc_offset(), 9 * 3600);
    }

    #[test]
    fn test_reinit_leaves_calibration() {
        let mut rtc = HostRtc::new();
        rtc.start_calibration_output().ok();
        rtc.reinit(RtcTrim::new(true, false, 3)).ok();
        assert!(!rtc.calibrating);
        assert_eq!(rtc.trim.value(), 3);
    }
}
