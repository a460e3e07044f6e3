//! Sound effect demo.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{AudioPlayer, InputDevice, MenuDisplay, SoundEffect};

use crate::navigator::{Navigator, TimedOut};
use crate::screen::SOUND_EFFECTS;

/// Play the built-in effects on demand.
pub async fn sound_effects<I, M, D, P>(
    nav: &mut Navigator<'_, I, M, D>,
    player: &mut P,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    P: AudioPlayer,
{
    let mut option = 1;
    while let Some(ordinal) = nav.present(&SOUND_EFFECTS, option).await.into_selection()? {
        option = ordinal.get();
        let effect = match option {
            1 => SoundEffect::Chime,
            2 => SoundEffect::Blip,
            3 => SoundEffect::Credit,
            _ => continue,
        };
        player.play_effect(effect);
    }
    Ok(())
}
