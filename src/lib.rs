//! An in-memory, single-volume DOS-style file system.
//!
//! ### Overview
//!
//! `dos-vfs` keeps a whole drive (`C:` by default) as a tree of directories and files in process
//! memory. Paths look like DOS paths (`C:\DOS\README.TXT`, `..\GAMES`), the volume has a fixed
//! capacity, and the whole state can be saved to and loaded from a JSON snapshot.
//!
//! **Key ideas**:
//! - **One seam**: a command interpreter talks to the volume only through the `FsBackend` trait.
//! - **No surprises**: a failed operation leaves the tree and the current directory untouched.
//! - **Derived accounting**: used space is always summed from the tree, never tracked on the side.
//! - **Non-recursive removal**: a directory must be emptied before it can be removed.
//!
//! ### Example
//!
//! ```
//! use dos_vfs::{DosFS, FsBackend, FsError};
//!
//! let mut fs = DosFS::new();
//! fs.create_directory("NEWDIR").unwrap();
//! fs.write("NEWDIR\\A.TXT", "hi").unwrap();
//! assert_eq!(fs.free_space(), 10 * 1024 * 1024 - 179);
//!
//! let err = fs.remove_directory("NEWDIR").unwrap_err();
//! assert!(matches!(err, FsError::NotEmpty(_)));
//! ```

mod config;
mod core;
mod vfs;

pub use crate::config::{DEFAULT_TOTAL_SPACE, FsConfig};
pub use crate::core::utils::{format_file_size, is_valid_name, parse_path};
pub use crate::core::{FsBackend, FsError, Result};
pub use crate::vfs::{
    DirEntry, DirNode, DosFS, Entry, EntryType, FileNode, ListingSummary, Snapshot,
};
