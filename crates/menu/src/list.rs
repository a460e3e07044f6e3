//! Serialized option lists.
//!
//! A menu's options live in one text buffer of labels separated by
//! [`DELIMITER`]. Options are addressed by 1-based [`Ordinal`]; the final
//! label may omit the trailing delimiter. Looking an option up never
//! allocates and never reads past the buffer.

use alloc::string::String;
use core::num::NonZeroU16;

/// Separator between labels.
pub const DELIMITER: char = '\n';

/// Most options a selection list control can show.
pub const MAX_OPTIONS: u16 = 253;

/// Marker appended to directory labels.
pub const DIR_MARKER: char = '/';

/// 1-based position of an option. Zero is reserved for "back".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ordinal(NonZeroU16);

impl Ordinal {
    /// The first option.
    pub const FIRST: Self = Self(NonZeroU16::MIN);

    /// `None` for zero.
    pub const fn new(n: u16) -> Option<Self> {
        match NonZeroU16::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Raw 1-based value.
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Zero-based position, for indexing parallel collections.
    pub fn index(self) -> usize {
        usize::from(self.get().saturating_sub(1))
    }
}

impl From<Ordinal> for u16 {
    fn from(ordinal: Ordinal) -> Self {
        ordinal.get()
    }
}

/// Byte range of one label inside a serialized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Offset of the first byte
    pub start: usize,
    /// Length in bytes, never zero
    pub len: usize,
}

impl Segment {
    /// The label text inside `list`.
    pub fn slice(self, list: &str) -> Option<&str> {
        list.get(self.start..self.start.checked_add(self.len)?)
    }
}

/// Find the label at `ordinal`.
///
/// Ordinal 0, ordinals past the end and empty segments (two delimiters in a
/// row, or a trailing delimiter) all give `None`. Only the requested segment
/// is inspected, so an empty label earlier in the list does not hide the
/// ones after it.
pub fn locate(list: &str, ordinal: u16) -> Option<Segment> {
    let start = match usize::from(ordinal) {
        0 => return None,
        1 => 0,
        // start right after the (ordinal - 1)th delimiter
        n => {
            let (at, _) = list.match_indices(DELIMITER).nth(n.checked_sub(2)?)?;
            at.checked_add(DELIMITER.len_utf8())?
        }
    };
    let rest = list.get(start..)?;
    let len = rest.find(DELIMITER).unwrap_or(rest.len());
    (len > 0).then_some(Segment { start, len })
}

/// Label text at `ordinal`, see [`locate`].
pub fn option(list: &str, ordinal: u16) -> Option<&str> {
    locate(list, ordinal)?.slice(list)
}

/// Number of addressable positions in `list`.
///
/// A trailing delimiter does not open a new position.
pub fn count(list: &str) -> u16 {
    u16::try_from(list.split_terminator(DELIMITER).count()).unwrap_or(u16::MAX)
}

/// Why a label could not be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListError {
    /// The list already holds [`MAX_OPTIONS`] labels
    #[error("option list is full")]
    Full,
    /// Empty labels cannot be addressed
    #[error("empty label")]
    Empty,
    /// The label contains the delimiter
    #[error("label contains the list delimiter")]
    Delimiter,
    /// Growing the buffer failed
    #[error("out of memory")]
    Alloc,
}

/// Owned serialized list built one label at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    buf: String,
    len: u16,
}

impl OptionList {
    /// Empty list.
    pub const fn new() -> Self {
        Self { buf: String::new(), len: 0 }
    }

    /// Build from labels, stopping at the first rejected one.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Result<Self, ListError> {
        let mut list = Self::new();
        for label in labels {
            list.push(label)?;
        }
        Ok(list)
    }

    /// Append a label and return its ordinal.
    pub fn push(&mut self, label: &str) -> Result<Ordinal, ListError> {
        self.append(label, None)
    }

    /// Append a directory name; the label gets a trailing [`DIR_MARKER`].
    pub fn push_dir(&mut self, name: &str) -> Result<Ordinal, ListError> {
        self.append(name, Some(DIR_MARKER))
    }

    fn append(&mut self, label: &str, suffix: Option<char>) -> Result<Ordinal, ListError> {
        if label.is_empty() {
            return Err(ListError::Empty);
        }
        if label.contains(DELIMITER) {
            return Err(ListError::Delimiter);
        }
        if self.len >= MAX_OPTIONS {
            return Err(ListError::Full);
        }
        let extra = label
            .len()
            .checked_add(suffix.map_or(0, char::len_utf8))
            .and_then(|n| n.checked_add(DELIMITER.len_utf8()))
            .ok_or(ListError::Alloc)?;
        self.buf.try_reserve(extra).map_err(|_| ListError::Alloc)?;

        if !self.buf.is_empty() {
            self.buf.push(DELIMITER);
        }
        self.buf.push_str(label);
        if let Some(suffix) = suffix {
            self.buf.push(suffix);
        }
        self.len = self.len.saturating_add(1);
        Ordinal::new(self.len).ok_or(ListError::Full)
    }

    /// Number of labels.
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Whether no label has been pushed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The serialized buffer.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Label at `ordinal`.
    pub fn get(&self, ordinal: Ordinal) -> Option<&str> {
        option(&self.buf, ordinal.get())
    }
}
