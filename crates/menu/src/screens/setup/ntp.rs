//! NTP server hostname entry.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Settings, TimeSync};

use crate::navigator::{Navigator, TimedOut};

/// Longest DNS hostname.
pub const HOSTNAME_MAX_LEN: usize = 253;

/// Edit the NTP server, starting from the stored name or else the one the
/// SNTP client is using. Does nothing when neither is known.
pub async fn ntp_server<I, M, D, S, T>(
    nav: &mut Navigator<'_, I, M, D>,
    settings: &mut S,
    time_sync: &mut T,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Settings,
    T: TimeSync,
{
    let initial = match settings.ntp_server() {
        Ok(hostname) if !hostname.is_empty() => hostname,
        _ => match time_sync.server_name() {
            Some(name) if !name.is_empty() => name.into(),
            _ => return Ok(()),
        },
    };

    let hostname = match nav.input_text("NTP Server", &initial, HOSTNAME_MAX_LEN).await? {
        Some(hostname) if !hostname.is_empty() => hostname,
        _ => return Ok(()),
    };
    match settings.set_ntp_server(&hostname) {
        Ok(()) => time_sync.set_server_name(&hostname),
        Err(err) => warn!("{}", err),
    }
    Ok(())
}
