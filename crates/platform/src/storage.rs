//! Storage abstraction for the SD card

use alloc::string::String;
use alloc::vec::Vec;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// Regular file
    File,
    /// Subdirectory
    Directory,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name without any path prefix
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
}

impl DirEntry {
    /// Regular file entry
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::File }
    }

    /// Directory entry
    pub fn dir(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::Directory }
    }

    /// Whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Path does not exist
    #[error("no such directory")]
    NotFound,
    /// Path exists but is not a directory
    #[error("not a directory")]
    NotADirectory,
    /// Card or filesystem I/O failure
    #[error("storage I/O error")]
    Io,
}

/// Storage trait for file system access
pub trait Storage {
    /// List the entries of `path` in no particular order.
    ///
    /// `.` and `..` are never reported.
    fn read_dir(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<Vec<DirEntry>, StorageError>>;

    /// Whether a card is physically present (card-detect switch).
    fn is_detected(&self) -> bool;

    /// Whether the filesystem on the card is mounted.
    fn is_mounted(&self) -> bool;
}
