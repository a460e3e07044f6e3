//! Alarm time entry.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Settings};

use crate::navigator::{Navigator, TimedOut};

const TITLE: &str = "Set Alarm Time";

/// Edit the stored alarm time. Nothing changes if the store cannot be read.
pub async fn set_alarm_time<I, M, D, S>(
    nav: &mut Navigator<'_, I, M, D>,
    settings: &mut S,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Settings,
{
    let current = match settings.alarm_time() {
        Ok(time) => time,
        Err(err) => {
            warn!("alarm time unavailable: {}", err);
            return Ok(());
        }
    };

    if let Some(time) = nav.input_time(TITLE, current).await? {
        match settings.set_alarm_time(time) {
            Ok(()) => info!("Alarm time set: {}:{}", time.hour, time.minute),
            Err(err) => warn!("alarm time not saved: {}", err),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Duration;
    use platform::mocks::{MockDisplay, MockInput, MockSettings};
    use platform::Button::*;
    use platform::WallTime;

    use crate::clock::IdleClock;

    #[tokio::test]
    async fn test_accepted_time_is_stored() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[Up, Right, Up, A]), &clock, Duration::from_millis(40));
        let mut settings = MockSettings::default();
        assert_eq!(set_alarm_time(&mut nav, &mut settings).await, Ok(()));
        assert_eq!(settings.alarm_time, WallTime { hour: 7, minute: 46 });
    }

    #[tokio::test]
    async fn test_cancel_keeps_stored_time() {
        let clock = IdleClock::<CriticalSectionRawMutex, _>::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[Up, B]), &clock, Duration::from_millis(40));
        let mut settings = MockSettings::default();
        set_alarm_time(&mut nav, &mut settings).await.ok();
        assert_eq!(settings.alarm_time, WallTime { hour: 6, minute: 45 });
    }
}
