//! Menu engine configuration.

use embassy_time::Duration;
use platform::config::SD_ROOT;

/// Default idle time before a menu session is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deepest directory level the browser descends into.
pub const DEFAULT_MAX_DEPTH: u8 = 16;

/// Default bound on full path length in bytes.
pub const DEFAULT_MAX_PATH_LEN: usize = 256;

/// Extensions the music browser accepts, compared case-insensitively.
pub const MUSIC_EXTENSIONS: &[&str] = &["vgm", "vgz"];

/// Tunables of the menu engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuConfig {
    /// Input idle time after which a session ends.
    pub timeout: Duration,
    /// Directory the music browser starts in.
    pub browse_root: &'static str,
    /// File extensions the music browser lists.
    pub extensions: &'static [&'static str],
    /// Deepest directory level the browser opens.
    pub max_depth: u8,
    /// Longest path the browser builds.
    pub max_path_len: usize,
}

impl MenuConfig {
    /// Defaults for the appliance.
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            browse_root: SD_ROOT,
            extensions: MUSIC_EXTENSIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }

    /// Override the input timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the browser root.
    #[must_use]
    pub const fn with_browse_root(mut self, root: &'static str) -> Self {
        self.browse_root = root;
        self
    }

    /// Override the accepted extensions.
    #[must_use]
    pub const fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }

    /// Override the maximum browse depth.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Override the maximum path length.
    #[must_use]
    pub const fn with_max_path_len(mut self, len: usize) -> Self {
        self.max_path_len = len;
        self
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::new()
    }
}
