//! Time zone selection: region, then zone within it.

use alloc::format;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Rtc, Settings, ZoneDb};

use crate::list;
use crate::navigator::{Navigator, TimedOut};
use crate::screen::{Screen, ScreenId};

/// Pick a region, then a zone. The zone name is stored and its POSIX rule
/// applied to the RTC; backing out of the zone list returns to the regions.
pub async fn time_zone<I, M, D, Z, S, R>(
    nav: &mut Navigator<'_, I, M, D>,
    zones: &Z,
    settings: &mut S,
    rtc: &mut R,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    Z: ZoneDb,
    S: Settings,
    R: Rtc,
{
    let Some(regions) = zones.region_list() else {
        warn!("time zone database unavailable");
        return Ok(());
    };
    let screen = Screen::new(ScreenId::TimeZoneRegions, "Select Region", &regions);

    let mut option = 1;
    while let Some(ordinal) = nav.present(&screen, option).await.into_selection()? {
        option = ordinal.get();
        let Some(region) = list::option(&regions, option) else {
            continue;
        };
        if select_zone(nav, zones, settings, rtc, region).await? {
            break;
        }
    }
    Ok(())
}

/// `Ok(true)` once a zone was stored.
async fn select_zone<I, M, D, Z, S, R>(
    nav: &mut Navigator<'_, I, M, D>,
    zones: &Z,
    settings: &mut S,
    rtc: &mut R,
    region: &str,
) -> Result<bool, TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    Z: ZoneDb,
    S: Settings,
    R: Rtc,
{
    let Some(names) = zones.zone_list(region) else {
        return Ok(false);
    };
    let screen = Screen::new(ScreenId::TimeZones, "Select Zone", &names);

    let mut option = 1;
    while let Some(ordinal) = nav.present(&screen, option).await.into_selection()? {
        option = ordinal.get();
        let Some(city) = list::option(&names, option) else {
            continue;
        };

        let zone = format!("{region}/{city}");
        let Some(tz) = zones.posix_tz(&zone) else {
            warn!("no rule for {}", zone.as_str());
            return Ok(false);
        };
        info!("Selected time zone: {} -> {}", zone.as_str(), tz);
        return Ok(match settings.set_time_zone(&zone) {
            Ok(()) => {
                rtc.set_time_zone(tz);
                true
            }
            Err(err) => {
                warn!("{}", err);
                false
            }
        });
    }
    Ok(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Duration;
    use platform::mocks::{MockDisplay, MockInput, MockRtc, MockSettings, MockZoneDb};
    use platform::Button::*;

    use crate::clock::IdleClock;

    #[tokio::test]
    async fn test_select_zone_stores_and_applies() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[A, Down, A]), &clock, Duration::from_millis(40));
        let (mut settings, mut rtc) = (MockSettings::default(), MockRtc::default());
        let result = time_zone(&mut nav, &MockZoneDb::default(), &mut settings, &mut rtc).await;
        assert_eq!(result, Ok(()));
        assert_eq!(settings.time_zone.as_deref(), Some("America/New_York"));
        assert_eq!(rtc.time_zone.as_deref(), Some("EST5EDT,M3.2.0,M11.1.0"));
        clock.render(|d| assert_eq!(d.last_list("Select Zone"), Some("Chicago\nNew_York")));
    }

    #[tokio::test]
    async fn test_back_from_zones_returns_to_regions() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[Down, A, B, B]), &clock, Duration::from_millis(40));
        let (mut settings, mut rtc) = (MockSettings::default(), MockRtc::default());
        let result = time_zone(&mut nav, &MockZoneDb::default(), &mut settings, &mut rtc).await;
        assert_eq!(result, Ok(()));
        assert!(settings.time_zone.is_none());
        clock.render(|d| assert_eq!(d.list_titles(), ["Select Region", "Select Zone", "Select Region"]));
    }

    #[tokio::test]
    async fn test_failed_store_leaves_rtc_alone() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[A, A, B]), &clock, Duration::from_millis(40));
        let mut settings = MockSettings { read_only: true, ..MockSettings::default() };
        let mut rtc = MockRtc::default();
        let result = time_zone(&mut nav, &MockZoneDb::default(), &mut settings, &mut rtc).await;
        assert_eq!(result, Ok(()));
        assert!(rtc.time_zone.is_none());
    }

    #[tokio::test]
    async fn test_timeout_in_zone_list() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[A]), &clock, Duration::from_millis(20));
        let (mut settings, mut rtc) = (MockSettings::default(), MockRtc::default());
        let result = time_zone(&mut nav, &MockZoneDb::default(), &mut settings, &mut rtc).await;
        assert_eq!(result, Err(TimedOut));
    }
}
