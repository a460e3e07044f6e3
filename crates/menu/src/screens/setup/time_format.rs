//! 12/24-hour selection.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Settings};

use crate::navigator::{Navigator, TimedOut};

/// Store the picked format and switch the idle face to it.
pub async fn time_format<I, M, D, S>(nav: &mut Navigator<'_, I, M, D>, settings: &mut S) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Settings,
{
    let twenty_four = match nav.message("Time Format", None, "", "12-hour\n24-hour").await.into_selection()? {
        Some(ordinal) => ordinal.get() == 2,
        None => return Ok(()),
    };
    match settings.set_time_format(twenty_four) {
        Ok(()) => nav.clock().set_twenty_four(twenty_four),
        Err(err) => warn!("{}", err),
    }
    Ok(())
}
