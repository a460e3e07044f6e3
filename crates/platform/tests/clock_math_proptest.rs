//! Property-based tests for clock and sensor math.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

use platform::{volume_percent, RtcTrim, WallTime};

proptest::proptest! {
    /// from_unix always yields an in-range wall time for non-negative shifts.
    #[test]
    fn from_unix_is_in_range(secs in 0u64..=4_102_444_800u64, offset in -50_400i32..=50_400i32) {
        if let Some(t) = WallTime::from_unix(secs, offset) {
            assert!(t.hour < 24 && t.minute < 60);
        } else {
            // only a negative shifted timestamp is rejected
            assert!((secs as i64) + i64::from(offset) < 0);
        }
    }

    /// A whole day later shows the same wall time.
    #[test]
    fn from_unix_repeats_daily(secs in 0u64..=4_102_444_800u64, offset in 0i32..=50_400i32) {
        assert_eq!(WallTime::from_unix(secs, offset), WallTime::from_unix(secs + 86_400, offset));
    }

    /// The 12-hour dial never shows hour 0 and agrees with the 24-hour hour.
    #[test]
    fn twelve_hour_dial_is_consistent(hour in 0u8..24, minute in 0u8..60) {
        let (h, pm) = WallTime::new(hour, minute).unwrap().twelve_hour();
        assert!((1..=12).contains(&h));
        assert_eq!(pm, hour >= 12);
        assert_eq!(u32::from(h) % 12, u32::from(hour) % 12);
    }

    /// Packing keeps the sign and masks the magnitude.
    #[test]
    fn trim_round_trips_parts(coarse: bool, add: bool, value in 0u8..=255u8) {
        let trim = RtcTrim::new(coarse, add, value);
        assert_eq!(trim.add(), add);
        assert_eq!(trim.value(), value & RtcTrim::MAX_VALUE);
        assert_eq!(RtcTrim::from_raw(coarse, trim.raw()), trim);
        assert_eq!(u32::from(trim.cycles()), u32::from(trim.value()) * 2);
    }

    /// Normalizing only ever touches disabled trims.
    #[test]
    fn normalize_keeps_active_trims(coarse: bool, raw: u8) {
        let trim = RtcTrim::from_raw(coarse, raw);
        if trim.is_disabled() {
            assert_eq!(trim.normalized(), RtcTrim::DISABLED);
        } else {
            assert_eq!(trim.normalized(), trim);
        }
    }

    /// Volume percentage is bounded and monotone in the raw reading.
    #[test]
    fn volume_percent_is_monotone(a: u16, b: u16) {
        assert!(volume_percent(a) <= 100);
        if a <= b {
            assert!(volume_percent(a) <= volume_percent(b));
        }
    }
}
