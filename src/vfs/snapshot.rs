//! Whole-volume snapshots: the state a session saves on exit and loads on start.
//!
//! The JSON layout is four named fields:
//!
//! ```text
//! {
//!   "filesystem": {
//!     "type": "dir", "name": "C:", "created": ..., "modified": ..., "content": {...}
//!   },
//!   "current_path": ["C:", "DOS"],
//!   "total_space": 10485760,
//!   "used_space": 177
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::utils;
use crate::core::{FsError, Result};
use crate::vfs::entry::DirNode;
use crate::{DosFS, Entry};

/// A complete copy of a [`DosFS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub filesystem: Entry,
    pub current_path: Vec<String>,
    pub total_space: u64,
    /// Informational only; the tree is the source of truth.
    pub used_space: u64,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot. Structural checks happen later, in [`DosFS::restore`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl DosFS {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            filesystem: self.root.clone(),
            current_path: self.cwd.clone(),
            total_space: self.total_space,
            used_space: self.used_space(),
        }
    }

    /// Replaces the whole filesystem with `snapshot`.
    ///
    /// The snapshot is checked first; on `Err(FsError::CorruptState)` the current state is
    /// left exactly as it was.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        let Snapshot {
            filesystem,
            current_path,
            total_space,
            used_space,
        } = snapshot;

        let root = match &filesystem {
            Entry::Directory(dir) => dir,
            Entry::File(_) => return Err(corrupt("root entry is not a directory")),
        };
        if !utils::is_drive_token(&root.name) || root.name != root.name.to_ascii_uppercase() {
            return Err(corrupt(format!("root name '{}' is not a drive", root.name)));
        }
        check_dir(root, 1)?;
        if total_space == 0 {
            return Err(corrupt("total space is zero"));
        }

        let candidate = DosFS {
            root: filesystem,
            cwd: current_path,
            total_space,
        };
        if candidate.cwd.first().map(String::as_str) != Some(candidate.drive()) {
            return Err(corrupt(format!(
                "current path {:?} does not start at the root",
                candidate.cwd
            )));
        }
        if !candidate.walk(&candidate.cwd).is_some_and(Entry::is_dir) {
            return Err(corrupt(format!(
                "current path {} is not a directory",
                candidate.current_path()
            )));
        }

        let actual = candidate.used_space();
        if actual != used_space {
            warn!(
                "snapshot records {} bytes used, tree holds {}; using the tree",
                used_space, actual
            );
        }
        *self = candidate;
        debug!("restored snapshot at {}", self.current_path());
        Ok(())
    }

    /// Writes a JSON snapshot to `path` on the host.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self.snapshot().to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        debug!("saved snapshot to {}", path.display());
        Ok(())
    }

    /// Loads a JSON snapshot from `path` on the host.
    ///
    /// A malformed snapshot surfaces as an [`FsError::CorruptState`] that can be recovered with
    /// `downcast_ref`. The filesystem is unchanged on any error.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot = Snapshot::from_json(&json)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        self.restore(snapshot)
            .with_context(|| format!("failed to load snapshot {}", path.display()))
    }
}

fn corrupt(msg: impl Into<String>) -> FsError {
    FsError::CorruptState(msg.into())
}

/// `depth` is the number of names below the drive of `dir`'s children.
fn check_dir(dir: &DirNode, depth: usize) -> Result<()> {
    for (key, child) in &dir.children {
        if depth > utils::MAX_DEPTH {
            return Err(corrupt(format!(
                "entry '{}' in {} is nested deeper than {} levels",
                key,
                dir.name,
                utils::MAX_DEPTH
            )));
        }
        if key != child.name() {
            return Err(corrupt(format!(
                "entry '{}' in {} is stored under '{}'",
                child.name(),
                dir.name,
                key
            )));
        }
        if !utils::is_valid_name(key) {
            return Err(corrupt(format!("invalid name '{}' in {}", key, dir.name)));
        }
        match child {
            Entry::File(file) if file.size != file.content.len() as u64 => {
                return Err(corrupt(format!(
                    "file {} records size {} but holds {} bytes",
                    key,
                    file.size,
                    file.content.len()
                )));
            }
            Entry::File(_) => {}
            Entry::Directory(sub) => check_dir(sub, depth + 1)?,
        }
    }
    Ok(())
}
