//! About box.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::config::{APP_NAME, APP_TAGLINE};
use platform::{InputDevice, MenuDisplay};

use crate::navigator::{Navigator, TimedOut};

/// Product name and tagline with an OK button.
pub async fn about<I, M, D>(nav: &mut Navigator<'_, I, M, D>) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
{
    nav.message(APP_NAME, None, APP_TAGLINE, "OK").await.into_selection()?;
    Ok(())
}
