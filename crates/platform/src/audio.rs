//! Audio playback abstraction
//!
//! Decoding and the sound chip emulation live behind [`AudioPlayer`]; the menu
//! only starts files, shows their tags and waits for the end of the track.

use alloc::string::String;

/// GD3 metadata of a VGM file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackTags {
    /// Game name
    pub game_name: Option<String>,
    /// Track name
    pub track_name: Option<String>,
    /// Composer
    pub track_author: Option<String>,
    /// Game release date
    pub game_release: Option<String>,
    /// Person who ripped the VGM
    pub vgm_author: Option<String>,
}

impl TrackTags {
    /// Present tags in display order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [
            &self.game_name,
            &self.track_name,
            &self.track_author,
            &self.game_release,
            &self.vgm_author,
        ]
        .into_iter()
        .filter_map(|tag| tag.as_deref())
    }
}

/// Built-in sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoundEffect {
    /// Alarm chime
    Chime,
    /// Short UI blip
    Blip,
    /// Coin / credit jingle
    Credit,
}

/// Player errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// File could not be opened
    #[error("file could not be opened")]
    Open,
    /// File is not a playable VGM stream
    #[error("unsupported file format")]
    Format,
    /// Another track is still playing
    #[error("player busy")]
    Busy,
}

/// Music player
pub trait AudioPlayer {
    /// Start playing `path` in the background and return its tags.
    fn play_file(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<TrackTags, PlayerError>>;

    /// Request the current track to stop; completion is reported through
    /// [`AudioPlayer::wait_finished`].
    fn stop(&mut self);

    /// Resolve once the current track has finished or been stopped.
    fn wait_finished(&mut self) -> impl core::future::Future<Output = ()>;

    /// Play one of the built-in sound effects.
    fn play_effect(&mut self, effect: SoundEffect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn tag_lines_skip_missing_tags() {
        let tags = TrackTags {
            game_name: Some("Mega Man 2".into()),
            track_author: Some("Takashi Tateishi".into()),
            ..TrackTags::default()
        };
        let lines: Vec<&str> = tags.lines().collect();
        assert_eq!(lines, ["Mega Man 2", "Takashi Tateishi"]);
    }
}
