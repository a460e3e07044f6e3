//! Recursive file browser.
//!
//! Each directory level is one selection list. Picking a directory opens a
//! nested level; picking a file either ends browsing with its path or hands
//! it to a [`FileHandler`], which decides whether browsing continues.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::future::Future;
use core::pin::Pin;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{DirEntry, EntryKind, InputDevice, MenuDisplay, Storage};

use crate::config::MenuConfig;
use crate::list::{OptionList, DELIMITER, MAX_OPTIONS};
use crate::navigator::{Choice, Navigator, TimedOut};
use crate::screen::{Screen, ScreenId};

const ERROR_TITLE: &str = "Error";
const NOT_DETECTED: &str = "SD card was not detected";
const NOT_MOUNTED: &str = "SD card could not be accessed";
const OPEN_FAILED: &str = "Could not open the directory";
const NO_FILES: &str = "No files found";
const TOO_DEEP: &str = "Folder nesting too deep";

/// How a browsing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Browse {
    /// A file was chosen; full path.
    Selected(String),
    /// The user backed out of the starting directory.
    Cancelled,
    /// The session timed out.
    TimedOut,
    /// The starting directory had nothing to show or could not be read.
    NoneFound,
}

/// Receives files picked in the browser.
pub trait FileHandler<N> {
    /// Handle `path`. `Ok(true)` ends browsing with this file selected,
    /// `Ok(false)` returns to the directory it was picked from.
    fn on_file(&mut self, nav: &mut N, path: &str) -> impl Future<Output = Result<bool, TimedOut>>;
}

/// Handler that accepts the first file picked.
pub struct PickFile;

impl<N> FileHandler<N> for PickFile {
    async fn on_file(&mut self, _nav: &mut N, _path: &str) -> Result<bool, TimedOut> {
        Ok(true)
    }
}

/// Directory browser over a [`Storage`].
pub struct FileBrowser<'s, S> {
    storage: &'s mut S,
    config: MenuConfig,
}

type Level<'f> = Pin<Box<dyn Future<Output = Browse> + 'f>>;

impl<'s, S: Storage> FileBrowser<'s, S> {
    /// Browse `storage` with the limits and extensions of `config`.
    pub fn new(storage: &'s mut S, config: MenuConfig) -> Self {
        Self { storage, config }
    }

    /// Browse from `path` until a file is picked.
    pub async fn browse<'c, I, M, D>(
        &mut self,
        nav: &mut Navigator<'c, I, M, D>,
        title: &str,
        path: &str,
    ) -> Browse
    where
        I: InputDevice,
        M: RawMutex,
        D: MenuDisplay,
    {
        self.browse_with(nav, title, path, &mut PickFile).await
    }

    /// Browse from `path`, passing every picked file to `handler`.
    pub async fn browse_with<'c, I, M, D, H>(
        &mut self,
        nav: &mut Navigator<'c, I, M, D>,
        title: &str,
        path: &str,
        handler: &mut H,
    ) -> Browse
    where
        I: InputDevice,
        M: RawMutex,
        D: MenuDisplay,
        H: FileHandler<Navigator<'c, I, M, D>>,
    {
        let mut root = String::new();
        if root.try_reserve(path.len()).is_err() {
            return Browse::NoneFound;
        }
        root.push_str(path);
        self.level(nav, handler, title, root, 0).await
    }

    fn level<'f, 'c, I, M, D, H>(
        &'f mut self,
        nav: &'f mut Navigator<'c, I, M, D>,
        handler: &'f mut H,
        title: &'f str,
        path: String,
        depth: u8,
    ) -> Level<'f>
    where
        'c: 'f,
        I: InputDevice + 'f,
        M: RawMutex + 'f,
        D: MenuDisplay + 'f,
        H: FileHandler<Navigator<'c, I, M, D>> + 'f,
    {
        Box::pin(async move {
            debug!("browse {} (depth {})", path.as_str(), depth);
            let entries = match self.storage.read_dir(&path).await {
                Ok(entries) => self.accepted(entries),
                Err(err) => {
                    warn!("read_dir {} failed: {}", path.as_str(), err);
                    let reason = self.fault_reason();
                    return fail(nav.notify(ERROR_TITLE, reason).await);
                }
            };
            if entries.is_empty() {
                return fail(nav.notify(ERROR_TITLE, NO_FILES).await);
            }
            let Some(list) = option_list(&entries) else {
                return Browse::NoneFound;
            };

            let screen = Screen::new(ScreenId::Browser(depth), title, list.as_str());
            let mut highlighted = 1;
            loop {
                let ordinal = match nav.present(&screen, highlighted).await {
                    Choice::Selected(ordinal) => ordinal,
                    Choice::Cancel => return Browse::Cancelled,
                    Choice::Timeout => return Browse::TimedOut,
                };
                highlighted = ordinal.get();
                let Some(entry) = entries.get(ordinal.index()) else {
                    continue;
                };
                let Some(child) = join(&path, &entry.name, self.config.max_path_len) else {
                    warn!("path too long under {}", path.as_str());
                    continue;
                };

                if entry.is_dir() {
                    let next = depth.saturating_add(1);
                    if next >= self.config.max_depth {
                        if nav.notify(ERROR_TITLE, TOO_DEEP).await.is_err() {
                            return Browse::TimedOut;
                        }
                        continue;
                    }
                    match self.level(nav, handler, &entry.name, child, next).await {
                        Browse::Selected(file) => return Browse::Selected(file),
                        Browse::TimedOut => return Browse::TimedOut,
                        Browse::Cancelled | Browse::NoneFound => {}
                    }
                } else {
                    info!("picked {}", child.as_str());
                    match handler.on_file(nav, &child).await {
                        Ok(true) => return Browse::Selected(child),
                        Ok(false) => {}
                        Err(TimedOut) => return Browse::TimedOut,
                    }
                }
            }
        })
    }

    /// Keep what the list can show, in byte order, capped at [`MAX_OPTIONS`].
    fn accepted(&self, mut entries: Vec<DirEntry>) -> Vec<DirEntry> {
        let extensions = self.config.extensions;
        entries.retain(|entry| {
            if entry.name.is_empty() || entry.name.contains(DELIMITER) {
                return false;
            }
            match entry.kind {
                EntryKind::Directory => !entry.name.starts_with('.'),
                EntryKind::File => has_extension(&entry.name, extensions),
            }
        });
        entries.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        entries.truncate(usize::from(MAX_OPTIONS));
        entries
    }

    fn fault_reason(&self) -> &'static str {
        if !self.storage.is_detected() {
            NOT_DETECTED
        } else if !self.storage.is_mounted() {
            NOT_MOUNTED
        } else {
            OPEN_FAILED
        }
    }
}

fn fail(shown: Result<(), TimedOut>) -> Browse {
    match shown {
        Ok(()) => Browse::NoneFound,
        Err(TimedOut) => Browse::TimedOut,
    }
}

fn option_list(entries: &[DirEntry]) -> Option<OptionList> {
    let mut list = OptionList::new();
    for entry in entries {
        let pushed = if entry.is_dir() { list.push_dir(&entry.name) } else { list.push(&entry.name) };
        if let Err(err) = pushed {
            warn!("option list: {}", err);
            return None;
        }
    }
    Some(list)
}

/// Case-insensitive extension match; `name` must have a stem.
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            extensions.iter().any(|want| ext.eq_ignore_ascii_case(want))
        }
        _ => false,
    }
}

/// `parent/name`, or `None` if longer than `max_len` bytes or out of memory.
pub fn join(parent: &str, name: &str, max_len: usize) -> Option<String> {
    let parent = parent.strip_suffix('/').unwrap_or(parent);
    let len = parent.len().checked_add(1)?.checked_add(name.len())?;
    if len > max_len {
        return None;
    }
    let mut path = String::new();
    path.try_reserve(len).ok()?;
    path.push_str(parent);
    path.push('/');
    path.push_str(name);
    Some(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Duration;
    use platform::mocks::{MockDisplay, MockInput, MockStorage};
    use platform::Button::{self, *};

    use crate::clock::IdleClock;

    type Clock = IdleClock<CriticalSectionRawMutex, MockDisplay>;

    fn config() -> MenuConfig {
        MenuConfig::new().with_timeout(Duration::from_millis(40))
    }

    async fn run(storage: &mut MockStorage, presses: &[Button]) -> (Browse, Clock) {
        let clock = Clock::new(MockDisplay::new(), false);
        let result = {
            let mut nav = Navigator::new(MockInput::with_presses(presses), &clock, config().timeout);
            FileBrowser::new(storage, config()).browse(&mut nav, "Music", "/sdcard").await
        };
        (result, clock)
    }

    fn music() -> MockStorage {
        MockStorage::new()
            .with_dir(
                "/sdcard",
                vec![DirEntry::file("b.vgm"), DirEntry::file("a.vgm"), DirEntry::dir("Sub")],
            )
            .with_dir("/sdcard/Sub", vec![DirEntry::file("x.VGZ")])
    }

    #[tokio::test]
    async fn test_sorted_listing_with_dir_marker() {
        let mut storage = music();
        let (result, clock) = run(&mut storage, &[B]).await;
        assert_eq!(result, Browse::Cancelled);
        assert_eq!(clock.render(|d| d.last_list("Music").map(str::to_owned)).unwrap(), "Sub/\na.vgm\nb.vgm");
    }

    #[tokio::test]
    async fn test_selecting_file_returns_full_path() {
        let mut storage = music();
        let (result, _) = run(&mut storage, &[Down, A]).await;
        assert_eq!(result, Browse::Selected("/sdcard/a.vgm".into()));
    }

    #[tokio::test]
    async fn test_selecting_dir_recurses() {
        let mut storage = music();
        let (result, clock) = run(&mut storage, &[A, A]).await;
        assert_eq!(result, Browse::Selected("/sdcard/Sub/x.VGZ".into()));
        assert_eq!(clock.render(|d| d.last_list("Sub").map(str::to_owned)).unwrap(), "x.VGZ");
        assert_eq!(storage.reads(), ["/sdcard", "/sdcard/Sub"]);
    }

    #[tokio::test]
    async fn test_back_from_subdir_re_presents_parent() {
        let mut storage = music();
        let (result, clock) = run(&mut storage, &[A, B, Down, Down, A]).await;
        assert_eq!(result, Browse::Selected("/sdcard/b.vgm".into()));
        assert_eq!(clock.render(|d| d.list_titles().len()), 5);
    }

    #[tokio::test]
    async fn test_timeout_in_subdir_unwinds() {
        let mut storage = music();
        let (result, _) = run(&mut storage, &[A]).await;
        assert_eq!(result, Browse::TimedOut);
    }

    #[tokio::test]
    async fn test_empty_dir_reports_no_files() {
        let mut storage = MockStorage::new().with_dir("/sdcard", vec![DirEntry::file("notes.txt")]);
        let (result, clock) = run(&mut storage, &[A]).await;
        assert_eq!(result, Browse::NoneFound);
        assert_eq!(clock.render(|d| d.message_bodies().len()), 1);
        assert!(clock.render(|d| d.list_titles().is_empty()));
    }

    #[tokio::test]
    async fn test_unreadable_dir_on_mounted_card() {
        let mut storage = MockStorage::new();
        let (result, clock) = run(&mut storage, &[A]).await;
        assert_eq!(result, Browse::NoneFound);
        clock.render(|d| {
            assert_eq!(d.message_bodies(), [OPEN_FAILED]);
            assert!(d.list_titles().is_empty());
        });
        assert_eq!(storage.reads(), ["/sdcard"]);
    }

    #[tokio::test]
    async fn test_too_deep_stays_on_level() {
        let mut storage = music();
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = Navigator::new(MockInput::with_presses(&[A, A, B]), &clock, config().timeout);
        let result = FileBrowser::new(&mut storage, config().with_max_depth(1))
            .browse(&mut nav, "Music", "/sdcard")
            .await;
        assert_eq!(result, Browse::Cancelled);
        assert_eq!(clock.render(|d| d.message_bodies().first().map(|s| s.to_string())), Some(TOO_DEEP.into()));
    }

    #[test]
    fn test_extension_filter() {
        let exts = &["vgm", "vgz"];
        assert!(has_extension("song.vgm", exts));
        assert!(has_extension("SONG.VgZ", exts));
        assert!(!has_extension("song.mp3", exts));
        assert!(!has_extension("vgm", exts));
        assert!(!has_extension(".vgm", exts));
    }

    #[test]
    fn test_join_bounds_length() {
        assert_eq!(join("/sdcard", "a.vgm", 256).as_deref(), Some("/sdcard/a.vgm"));
        assert_eq!(join("/sdcard/", "a.vgm", 256).as_deref(), Some("/sdcard/a.vgm"));
        assert_eq!(join("/sdcard", "a.vgm", 12), None);
        assert_eq!(join("/sdcard", "a.vgm", 13).as_deref(), Some("/sdcard/a.vgm"));
    }
}
