//! Hardware diagnostics.
//!
//! The live screens redraw on a short poll and end on a key press or after
//! the session timeout without one.

use alloc::format;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use platform::{volume_percent, Button, InputDevice, LightGain, MenuDisplay, SensorError, Sensors};

use crate::navigator::{Navigator, TimedOut};
use crate::screen::DIAGNOSTICS;

const CONTRAST_STEP: u8 = 16;
const TOUCH_PERIOD: Duration = Duration::from_millis(100);
const LIGHT_PERIOD: Duration = Duration::from_millis(200);
const VOLUME_PERIOD: Duration = Duration::from_millis(250);
const LIGHT_SAMPLES: u32 = 10;

/// Diagnostics menu.
pub async fn diagnostics<I, M, D, S>(
    nav: &mut Navigator<'_, I, M, D>,
    sensors: &mut S,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Sensors,
{
    let mut option = 1;
    while let Some(ordinal) = nav.present(&DIAGNOSTICS, option).await.into_selection()? {
        option = ordinal.get();
        match option {
            1 => display_test(nav).await?,
            2 => touch(nav, sensors).await?,
            3 => ambient_light(nav, sensors).await?,
            4 => volume(nav, sensors).await?,
            _ => {}
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Normal,
    Inverted,
    Logo,
}

impl Pattern {
    fn next(self) -> Self {
        match self {
            Self::Normal => Self::Inverted,
            Self::Inverted => Self::Logo,
            Self::Logo => Self::Normal,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Normal => Self::Logo,
            Self::Inverted => Self::Normal,
            Self::Logo => Self::Inverted,
        }
    }
}

/// Test patterns and contrast. Contrast is restored on exit.
pub async fn display_test<I, M, D>(nav: &mut Navigator<'_, I, M, D>) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
{
    let clock = nav.clock();
    let initial = clock.render(|d| d.contrast());
    let mut contrast = initial;
    let mut pattern = Pattern::Normal;
    nav.clear_events();

    let result = loop {
        clock.render(|d| match pattern {
            Pattern::Normal => d.draw_test_pattern(false),
            Pattern::Inverted => d.draw_test_pattern(true),
            Pattern::Logo => d.draw_logo(),
        });
        match nav.wait_for_press().await {
            Err(err) => break Err(err),
            Ok(Button::Up) => {
                contrast = contrast.wrapping_add(CONTRAST_STEP);
                clock.render(|d| d.set_contrast(contrast));
            }
            Ok(Button::Down) => {
                contrast = contrast.wrapping_sub(CONTRAST_STEP);
                clock.render(|d| d.set_contrast(contrast));
            }
            Ok(Button::Left) => pattern = pattern.prev(),
            Ok(Button::Right) => pattern = pattern.next(),
            Ok(Button::B) => break Ok(()),
            Ok(_) => {}
        }
    };

    clock.render(|d| d.set_contrast(initial));
    result
}

/// Live touch pad reading; any key other than the pad itself exits.
pub async fn touch<I, M, D, S>(nav: &mut Navigator<'_, I, M, D>, sensors: &mut S) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Sensors,
{
    let mut idle = Duration::from_ticks(0);
    loop {
        let raw = match sensors.touch_pad_raw() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("touch pad: {}", err);
                return Ok(());
            }
        };
        nav.show_static("Capacitive Touch", &format!("Default time: {raw:5}"));
        match nav.poll_press(TOUCH_PERIOD, &mut idle).await? {
            Some(Button::Touch) | None => {}
            Some(_) => return Ok(()),
        }
    }
}

async fn light_sum<S: Sensors>(sensors: &mut S, gain: LightGain) -> Result<u32, SensorError> {
    let mut sum = 0u32;
    for _ in 0..LIGHT_SAMPLES {
        Timer::after_millis(1).await;
        sum = sum.saturating_add(u32::from(sensors.ambient_light_raw(gain)?));
    }
    Ok(sum)
}

/// Ambient light averages at both gains; any key exits.
pub async fn ambient_light<I, M, D, S>(
    nav: &mut Navigator<'_, I, M, D>,
    sensors: &mut S,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Sensors,
{
    let mut idle = Duration::from_ticks(0);
    loop {
        let sums = match (light_sum(sensors, LightGain::Db0).await, light_sum(sensors, LightGain::Db2_5).await) {
            (Ok(low), Ok(high)) => (low, high),
            (Err(err), _) | (_, Err(err)) => {
                warn!("light sensor: {}", err);
                return Ok(());
            }
        };
        nav.show_static("Ambient Light Sensor", &light_report(sums.0, sums.1));
        if nav.poll_press(LIGHT_PERIOD, &mut idle).await?.is_some() {
            return Ok(());
        }
    }
}

/// Two lines of `average (sum)`, one per gain.
#[allow(clippy::arithmetic_side_effects)] // LIGHT_SAMPLES is non-zero
pub fn light_report(low: u32, high: u32) -> alloc::string::String {
    format!(
        "  0 dB: {:4} ({:5})\n2.5 dB: {:4} ({:5})",
        low / LIGHT_SAMPLES,
        low,
        high / LIGHT_SAMPLES,
        high
    )
}

/// Volume knob raw value and percentage; any key exits.
pub async fn volume<I, M, D, S>(nav: &mut Navigator<'_, I, M, D>, sensors: &mut S) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Sensors,
{
    let mut idle = Duration::from_ticks(0);
    loop {
        let raw = match sensors.volume_raw() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("volume knob: {}", err);
                return Ok(());
            }
        };
        let body = format!("Value: {raw:4}\nLevel: {:3}%", volume_percent(raw));
        nav.show_static("Volume Adjustment", &body);
        if nav.poll_press(VOLUME_PERIOD, &mut idle).await?.is_some() {
            return Ok(());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use platform::mocks::{DisplayCall, MockDisplay, MockInput, MockSensors};
    use platform::Button::*;

    use crate::clock::IdleClock;

    type Clock = IdleClock<CriticalSectionRawMutex, MockDisplay>;

    #[tokio::test]
    async fn test_display_test_cycles_and_restores_contrast() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[Right, Right, Up, Up, B]), &clock, Duration::from_millis(40));
        assert_eq!(display_test(&mut nav).await, Ok(()));
        clock.render(|d| {
            assert_eq!(d.contrast(), 0x80);
            assert_eq!(d.calls().first(), Some(&DisplayCall::TestPattern(false)));
            assert!(d.calls().contains(&DisplayCall::TestPattern(true)));
            assert!(d.calls().contains(&DisplayCall::Logo));
        });
    }

    #[tokio::test]
    async fn test_touch_exits_on_other_key() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[Touch, A]), &clock, Duration::from_millis(500));
        let mut sensors = MockSensors::default();
        assert_eq!(touch(&mut nav, &mut sensors).await, Ok(()));
        let bodies: std::vec::Vec<String> = clock.render(|d| {
            d.calls()
                .iter()
                .filter_map(|c| match c {
                    DisplayCall::StaticList { body, .. } => Some(body.clone()),
                    _ => None,
                })
                .collect()
        });
        assert_eq!(bodies, ["Default time:  1200", "Default time:  1200"]);
    }

    #[tokio::test]
    async fn test_touch_unavailable_returns() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::new(), &clock, Duration::from_millis(40));
        let mut sensors = MockSensors { touch: None, ..MockSensors::default() };
        assert_eq!(touch(&mut nav, &mut sensors).await, Ok(()));
    }

    #[tokio::test]
    async fn test_live_screen_times_out() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::new(), &clock, Duration::from_millis(300));
        let mut sensors = MockSensors::default();
        assert_eq!(volume(&mut nav, &mut sensors).await, Err(TimedOut));
    }

    #[tokio::test]
    async fn test_ambient_light_samples_both_gains() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[B]), &clock, Duration::from_millis(500));
        let mut sensors = MockSensors::default();
        assert_eq!(ambient_light(&mut nav, &mut sensors).await, Ok(()));
        assert_eq!(sensors.light_samples, 20);
    }

    #[test]
    fn test_light_report_format() {
        assert_eq!(light_report(3000, 12345), "  0 dB:  300 ( 3000)\n2.5 dB: 1234 (12345)");
    }
}
