//! Local filesystem Storage implementation for the desktop simulator.
//!
//! `LocalFileStorage` implements `platform::Storage` using `std::fs`.
//! Used when the `std` feature is enabled (simulator builds only).
//! Device paths under the SD mount point (`/sdcard/...`) are resolved
//! relative to the host directory provided at construction.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::string::ToString;
use std::vec::Vec;

use crate::config::SD_ROOT;
use crate::storage::{DirEntry, EntryKind, Storage, StorageError};

/// A `platform::Storage` implementation backed by `std::fs`.
///
/// # Example
/// ```no_run
/// # async fn example() {
/// use platform::storage_local::LocalFileStorage;
/// use platform::Storage;
/// let mut storage = LocalFileStorage::new("/home/user/vgm");
/// let entries = storage.read_dir("/sdcard").await.unwrap();
/// # }
/// ```
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create a new storage whose `/sdcard` is the host directory `music_root`.
    #[must_use]
    pub fn new(music_root: impl Into<PathBuf>) -> Self {
        Self { root: music_root.into() }
    }

    /// Create from the `MUSIC_PATH` environment variable.
    ///
    /// Returns `None` if `MUSIC_PATH` is not set or is not valid UTF-8.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("MUSIC_PATH").ok().map(Self::new)
    }

    /// Map a device path onto the host root.
    ///
    /// Returns `None` for paths outside the mount point or paths that try to
    /// climb out of it with `..`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let rest = path.strip_prefix(SD_ROOT)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        let rest = Path::new(rest.trim_start_matches('/'));
        if rest.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(rest))
    }
}

fn map_io(err: &std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io,
    }
}

impl Storage for LocalFileStorage {
    async fn read_dir(&mut self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let full = self.resolve(path).ok_or(StorageError::NotFound)?;
        if full.is_file() {
            return Err(StorageError::NotADirectory);
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&full).map_err(|e| map_io(&e))? {
            let entry = entry.map_err(|e| map_io(&e))?;
            let file_type = entry.file_type().map_err(|e| map_io(&e))?;
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            // Non-UTF-8 names cannot be shown on the panel font anyway.
            let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
                continue;
            };
            entries.push(DirEntry { name, kind });
        }
        Ok(entries)
    }

    fn is_detected(&self) -> bool {
        self.root.exists()
    }

    fn is_mounted(&self) -> bool {
        fs::read_dir(&self.root).is_ok()
    }
}
