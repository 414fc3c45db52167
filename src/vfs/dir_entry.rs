use chrono::{DateTime, Utc};

use crate::{Entry, EntryType};

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    name: String,
    kind: EntryType,
    size: u64,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl DirEntry {
    /// A `.` or `..` pseudo-entry carrying the timestamps of the directory it stands for.
    pub(crate) fn pseudo(name: &str, created: DateTime<Utc>, modified: DateTime<Utc>) -> DirEntry {
        DirEntry {
            name: name.to_string(),
            kind: EntryType::Directory,
            size: 0,
            created,
            modified,
        }
    }

    pub(crate) fn from_entry(entry: &Entry) -> DirEntry {
        DirEntry {
            name: entry.name().to_string(),
            kind: entry.entry_type(),
            size: entry.size(),
            created: entry.created(),
            modified: entry.modified(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryType {
        self.kind
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }

    /// True for the synthesized `.` and `..` entries.
    pub fn is_pseudo(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Totals printed under a directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub files: usize,
    /// Directory lines, pseudo-entries included.
    pub dirs: usize,
    pub bytes: u64,
}

impl ListingSummary {
    pub fn from_entries(entries: &[DirEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut summary, entry| {
            if entry.is_dir() {
                summary.dirs += 1;
            } else {
                summary.files += 1;
                summary.bytes += entry.size();
            }
            summary
        })
    }
}
