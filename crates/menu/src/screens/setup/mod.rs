//! Setup menu.

pub mod network_info;
pub mod ntp;
pub mod rtc_calibration;
pub mod time_format;
pub mod time_zone;
pub mod wifi;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::Board;

use super::BoardNavigator;
use crate::navigator::TimedOut;
use crate::screen::SETUP;
use crate::task::Devices;

/// Setup menu. Returns when the user backs out.
pub async fn setup<B: Board, M: RawMutex>(
    nav: &mut BoardNavigator<'_, B, M>,
    dev: &mut Devices<B>,
) -> Result<(), TimedOut> {
    let mut option = 1;
    while let Some(ordinal) = nav.present(&SETUP, option).await.into_selection()? {
        option = ordinal.get();
        match option {
            1 => wifi::wifi_setup(nav, &mut dev.network).await?,
            2 => network_info::network_info(nav, &dev.network).await?,
            3 => time_zone::time_zone(nav, &dev.zones, &mut dev.settings, &mut dev.rtc).await?,
            4 => time_format::time_format(nav, &mut dev.settings).await?,
            5 => ntp::ntp_server(nav, &mut dev.settings, &mut dev.time_sync).await?,
            6 => rtc_calibration::rtc_calibration(nav, &mut dev.settings, &mut dev.rtc).await?,
            _ => {}
        }
    }
    Ok(())
}
