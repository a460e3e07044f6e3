//! Demo playback: browse the card and play the picked file.

use alloc::string::String;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{AudioPlayer, Button, InputDevice, MenuDisplay, Storage, TrackTags};

use crate::browser::{Browse, FileBrowser, FileHandler};
use crate::config::MenuConfig;
use crate::navigator::{Navigator, TimedOut};

const TITLE: &str = "Demo Playback";
const PLAYER_TITLE: &str = "VGM Player";

/// Browse from the configured root and play files until the user backs out.
pub async fn demo_playback<I, M, D, S, P>(
    nav: &mut Navigator<'_, I, M, D>,
    storage: &mut S,
    player: &mut P,
    config: &MenuConfig,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Storage,
    P: AudioPlayer,
{
    let mut handler = PlayFile::new(player);
    match FileBrowser::new(storage, *config)
        .browse_with(nav, TITLE, config.browse_root, &mut handler)
        .await
    {
        Browse::TimedOut => Err(TimedOut),
        Browse::Selected(_) | Browse::Cancelled | Browse::NoneFound => Ok(()),
    }
}

/// Plays each picked file to the end (or until B), then stays in the browser.
pub struct PlayFile<'p, P> {
    player: &'p mut P,
}

impl<'p, P> PlayFile<'p, P> {
    /// Play through `player`.
    pub fn new(player: &'p mut P) -> Self {
        Self { player }
    }
}

impl<'c, P, I, M, D> FileHandler<Navigator<'c, I, M, D>> for PlayFile<'_, P>
where
    P: AudioPlayer,
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
{
    async fn on_file(&mut self, nav: &mut Navigator<'c, I, M, D>, path: &str) -> Result<bool, TimedOut> {
        info!("File: {}", path);
        let tags = match self.player.play_file(path).await {
            Ok(tags) => tags,
            Err(err) => {
                warn!("cannot play {}: {}", path, err);
                return Ok(false);
            }
        };

        nav.show_static(PLAYER_TITLE, &now_playing(&tags, path));
        loop {
            match select(self.player.wait_finished(), nav.input().wait_for_event()).await {
                Either::First(()) => break,
                Either::Second(event) => {
                    if event.pressed() == Some(Button::B) {
                        debug!("stopping playback");
                        self.player.stop();
                    }
                }
            }
        }
        Ok(false)
    }
}

/// Tag lines in display order, or the file name when the file has no tags.
pub fn now_playing(tags: &TrackTags, path: &str) -> String {
    let mut body = String::new();
    for line in tags.lines() {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(line);
    }
    if body.is_empty() {
        body.push_str(path.rsplit('/').next().unwrap_or(path));
    }
    body
}
