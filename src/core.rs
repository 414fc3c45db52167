mod error;
pub mod utils;

pub use error::FsError;

use crate::{DirEntry, Entry};

/// Operations the command layer may call on a filesystem.
///
/// Paths are DOS-style: `\` or `/` separated, with an optional leading drive (`C:` or `C:\`).
/// A relative path may start with a single `.` or `..` segment.
pub trait FsBackend {
    /// Returns the current directory as a display path, e.g. `C:\DOS`.
    fn current_path(&self) -> String;

    /// Returns the absolute display path `path` refers to.
    fn full_path(&self, path: &str) -> Result<String>;

    /// Looks up the entry `path` refers to.
    fn resolve(&self, path: &str) -> Option<&Entry>;

    /// Changes the current directory. State is unchanged on error.
    fn change_directory(&mut self, path: &str) -> Result<()>;

    /// Creates an empty directory. Parents must already exist.
    fn create_directory(&mut self, path: &str) -> Result<()>;

    /// Removes an empty directory.
    fn remove_directory(&mut self, path: &str) -> Result<()>;

    /// Lists a directory, starting with the `.` and `..` pseudo-entries.
    fn list(&self, path: &str) -> Result<Vec<DirEntry>>;

    /// Renders the directory tree below `path`, one line per entry.
    fn generate_tree(&self, path: &str, include_files: bool) -> Result<Vec<String>>;

    fn read(&self, path: &str) -> Result<&str>;

    /// Creates or replaces a file.
    fn write(&mut self, path: &str, content: &str) -> Result<()>;

    fn delete(&mut self, path: &str) -> Result<()>;

    fn copy(&mut self, source: &str, destination: &str) -> Result<()>;

    /// Renames a file or directory within its parent.
    fn rename(&mut self, path: &str, new_name: &str) -> Result<()>;

    /// Bytes left on the volume.
    fn free_space(&self) -> u64;
}

pub type Result<T> = std::result::Result<T, FsError>;
