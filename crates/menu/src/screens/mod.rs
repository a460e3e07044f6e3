//! The appliance's menu tree.
//!
//! Every screen is a loop over [`Navigator::present`] that dispatches on the
//! selected ordinal and returns on back. Timeouts propagate with `?`, so one
//! timeout anywhere unwinds the whole tree back to [`main_menu`]'s caller.

pub mod about;
pub mod alarm;
pub mod diagnostics;
pub mod effects;
pub mod playback;
pub mod setup;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::Board;

use crate::config::MenuConfig;
use crate::navigator::{Navigator, TimedOut};
use crate::screen::MAIN_MENU;
use crate::task::Devices;

/// Navigator driving a board's keypad and display.
pub type BoardNavigator<'c, B, M> = Navigator<'c, <B as Board>::Input, M, <B as Board>::Display>;

/// Top-level menu. Returns when the user backs out.
pub async fn main_menu<B: Board, M: RawMutex>(
    nav: &mut BoardNavigator<'_, B, M>,
    dev: &mut Devices<B>,
    config: &MenuConfig,
) -> Result<(), TimedOut> {
    let mut option = 1;
    while let Some(ordinal) = nav.present(&MAIN_MENU, option).await.into_selection()? {
        option = ordinal.get();
        match option {
            1 => playback::demo_playback(nav, &mut dev.storage, &mut dev.player, config).await?,
            2 => effects::sound_effects(nav, &mut dev.player).await?,
            3 => diagnostics::diagnostics(nav, &mut dev.sensors).await?,
            4 => alarm::set_alarm_time(nav, &mut dev.settings).await?,
            5 => setup::setup::<B, M>(nav, dev).await?,
            6 => about::about(nav).await?,
            _ => {}
        }
    }
    Ok(())
}
