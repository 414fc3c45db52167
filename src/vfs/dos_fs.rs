//! This module provides the in-memory DOS volume: the directory tree, the current directory,
//! path resolution and space accounting. Directory and file operations live in sibling modules
//! as further `impl DosFS` blocks.

use log::{debug, trace};

use crate::config::FsConfig;
use crate::core::utils::{self, SEPARATOR};
use crate::core::{FsBackend, FsError, Result};
use crate::vfs::entry::{DirNode, FileNode};
use crate::{DirEntry, Entry};

const README_NAME: &str = "README.TXT";
const README_TEXT: &str = "Welcome to DOS-Simulator!\n\n\
This is an in-memory simulation of an MS-DOS like environment.\n\
Type HELP to see a list of available commands.\n\n\
Enjoy exploring the virtual DOS system!";

/// A single-volume DOS filesystem kept entirely in memory.
///
/// ### Internal state
///
/// * `root` - The drive directory (`C:`). It owns every other entry and is always
///   an `Entry::Directory`.
/// * `cwd` - Current directory as segment names from the root, starting with the drive token:
///   `["C:", "DOS"]` is `C:\DOS`. It always names an existing directory.
/// * `total_space` - Volume capacity in bytes. Used space is never stored; it is summed from the
///   tree whenever it is needed.
///
/// ### Path resolution
///
/// A path starting with the drive (`C:`, `C:\DOS`) is absolute. Anything else is relative to the
/// current directory, and only its *first* segment may be `.` or `..` (`..\.` counts as `..`).
/// Later relative markers are rejected with [`FsError::InvalidPath`]. Empty segments (`C:\`,
/// `DOS\\A`) are skipped.
///
/// ### Example
///
/// ```
/// use dos_vfs::{DosFS, FsBackend};
///
/// let mut fs = DosFS::new();
/// fs.create_directory("GAMES").unwrap();
/// fs.write("GAMES\\SCORES.TXT", "999").unwrap();
/// fs.change_directory("GAMES").unwrap();
/// assert_eq!(fs.current_path(), "C:\\GAMES");
/// assert_eq!(fs.read("SCORES.TXT").unwrap(), "999");
/// ```
#[derive(Debug, Clone)]
pub struct DosFS {
    pub(crate) root: Entry,
    pub(crate) cwd: Vec<String>,
    pub(crate) total_space: u64,
}

impl Default for DosFS {
    fn default() -> Self {
        Self::new()
    }
}

impl DosFS {
    /// Creates a 10 MiB `C:` volume holding `C:\DOS\README.TXT`.
    pub fn new() -> Self {
        let config = FsConfig::default();
        Self::build(&config.drive_token(), config.total_space, config.seed)
    }

    /// Creates a volume from `config`. Fails with `InvalidName` for a non-letter drive.
    pub fn with_config(config: FsConfig) -> Result<Self> {
        if !config.drive.is_ascii_alphabetic() {
            return Err(FsError::InvalidName(config.drive.to_string()));
        }
        Ok(Self::build(&config.drive_token(), config.total_space, config.seed))
    }

    fn build(drive: &str, total_space: u64, seed: bool) -> Self {
        let mut root = DirNode::new(drive);
        if seed {
            let mut dos = DirNode::new("DOS");
            dos.children.insert(
                README_NAME.to_string(),
                Entry::File(FileNode::new(README_NAME, README_TEXT)),
            );
            root.children.insert("DOS".to_string(), Entry::Directory(dos));
        }
        Self {
            root: Entry::Directory(root),
            cwd: vec![drive.to_string()],
            total_space,
        }
    }

    /// Drive token of the volume, e.g. `C:`.
    pub fn drive(&self) -> &str {
        self.root.name()
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    /// Current directory as segments from the root, drive first.
    pub fn cwd(&self) -> &[String] {
        &self.cwd
    }

    pub fn total_space(&self) -> u64 {
        self.total_space
    }

    /// Sum of all file sizes, recomputed from the tree.
    pub fn used_space(&self) -> u64 {
        Self::usage(&self.root)
    }

    /// Free bytes on the volume; zero when the volume is over capacity.
    pub fn free_space(&self) -> u64 {
        self.total_space.saturating_sub(self.used_space())
    }

    pub(crate) fn usage(entry: &Entry) -> u64 {
        match entry {
            Entry::File(file) => file.size,
            Entry::Directory(dir) => dir.children.values().map(Self::usage).sum(),
        }
    }

    pub fn current_path(&self) -> String {
        self.display_path(&self.cwd)
    }

    /// Absolute display path of `path`. The path need not exist.
    pub fn full_path(&self, path: &str) -> Result<String> {
        let segments = self.locate(path)?;
        Ok(self.display_path(&segments))
    }

    pub(crate) fn display_path(&self, segments: &[String]) -> String {
        if segments.len() <= 1 {
            return self.drive().to_string();
        }
        segments.join(SEPARATOR.to_string().as_str())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    pub fn is_dir(&self, path: &str) -> Result<bool> {
        self.resolve(path)
            .map(Entry::is_dir)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    pub fn is_file(&self, path: &str) -> Result<bool> {
        self.resolve(path)
            .map(Entry::is_file)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// Looks up the entry `path` names. The root is returned for an empty path or the bare drive.
    pub fn resolve(&self, path: &str) -> Option<&Entry> {
        let segments = self.locate(path).ok()?;
        self.walk(&segments)
    }

    /// Converts `path` into absolute segments (drive first) without touching the tree.
    ///
    /// Only a leading `.` or `..` is honoured, and a `.` right after a leading `..`. `..` at the
    /// root stays at the root.
    pub(crate) fn locate(&self, path: &str) -> Result<Vec<String>> {
        let parts = utils::parse_path(path);
        let mut remaining = parts.iter().map(String::as_str).peekable();

        let mut segments = match remaining.peek().copied() {
            Some(first) if first.contains(':') => {
                if !utils::is_drive_token(first) {
                    return Err(FsError::InvalidPath(path.to_string()));
                }
                if first != self.drive() {
                    return Err(FsError::InvalidPath(format!("no such drive: {}", first)));
                }
                remaining.next();
                vec![self.drive().to_string()]
            }
            Some("..") => {
                remaining.next();
                let mut segments = self.cwd.clone();
                if segments.len() > 1 {
                    segments.pop();
                }
                // `..\.` names the parent too
                if remaining.peek() == Some(&".") {
                    remaining.next();
                }
                segments
            }
            Some(".") => {
                remaining.next();
                self.cwd.clone()
            }
            _ => self.cwd.clone(),
        };

        for part in remaining {
            match part {
                "" => continue,
                "." | ".." => {
                    return Err(FsError::InvalidPath(format!(
                        "'{}' is only allowed at the start of a relative path: {}",
                        part, path
                    )));
                }
                name => segments.push(name.to_string()),
            }
        }
        trace!("located {:?} as {:?}", path, segments);
        Ok(segments)
    }

    /// Follows absolute segments (drive first) down from the root.
    pub(crate) fn walk(&self, segments: &[String]) -> Option<&Entry> {
        let mut current = &self.root;
        for name in segments.iter().skip(1) {
            current = current.as_dir()?.children.get(name.as_str())?;
        }
        Some(current)
    }

    /// Follows absolute segments to a directory, mutably.
    ///
    /// With `create_missing` set, absent directories along the way are created. Callers check
    /// the names and that no file blocks the way before asking for creation.
    pub(crate) fn walk_dir_mut(
        &mut self,
        segments: &[String],
        create_missing: bool,
    ) -> Option<&mut DirNode> {
        let mut current = self.root.as_dir_mut()?;
        for name in segments.iter().skip(1) {
            if create_missing && !current.children.contains_key(name.as_str()) {
                current
                    .children
                    .insert(name.clone(), Entry::Directory(DirNode::new(name)));
                current.touch();
                debug!("created intermediate directory {}", name);
            }
            current = current.children.get_mut(name.as_str())?.as_dir_mut()?;
        }
        Some(current)
    }

    /// Resolves `path` to a directory or explains why it is not one.
    pub(crate) fn expect_dir(&self, path: &str) -> Result<(Vec<String>, &DirNode)> {
        let segments = self.locate(path)?;
        match self.walk(&segments) {
            Some(Entry::Directory(dir)) => Ok((segments, dir)),
            Some(Entry::File(_)) => Err(FsError::NotADirectory(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    /// Mutable counterpart of [`expect_dir`](Self::expect_dir) for already located segments.
    pub(crate) fn expect_dir_mut(&mut self, segments: &[String]) -> Result<&mut DirNode> {
        let display = self.display_path(segments);
        match self.walk(segments) {
            Some(Entry::Directory(_)) => {}
            Some(Entry::File(_)) => return Err(FsError::NotADirectory(display)),
            None => return Err(FsError::NotFound(display)),
        }
        self.walk_dir_mut(segments, false)
            .ok_or(FsError::NotFound(display))
    }

    /// Fails with `TooDeep` when a child of `parent_segments` would exceed [`utils::MAX_DEPTH`].
    pub(crate) fn check_depth(parent_segments: &[String], path: &str) -> Result<()> {
        // the drive segment and the new name cancel out
        if parent_segments.len() > utils::MAX_DEPTH {
            return Err(FsError::TooDeep {
                path: path.to_string(),
                max: utils::MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Splits `path` into absolute parent segments and the final name.
    ///
    /// A path without a separator lives in the current directory.
    pub(crate) fn locate_parent<'p>(&self, path: &'p str) -> Result<(Vec<String>, &'p str)> {
        let (parent, name) = utils::split_parent(path);
        let parent = if parent.is_empty() { "." } else { parent };
        Ok((self.locate(parent)?, name))
    }
}

impl FsBackend for DosFS {
    fn current_path(&self) -> String {
        DosFS::current_path(self)
    }

    fn full_path(&self, path: &str) -> Result<String> {
        DosFS::full_path(self, path)
    }

    fn resolve(&self, path: &str) -> Option<&Entry> {
        DosFS::resolve(self, path)
    }

    fn change_directory(&mut self, path: &str) -> Result<()> {
        DosFS::change_directory(self, path)
    }

    fn create_directory(&mut self, path: &str) -> Result<()> {
        DosFS::create_directory(self, path)
    }

    fn remove_directory(&mut self, path: &str) -> Result<()> {
        DosFS::remove_directory(self, path)
    }

    fn list(&self, path: &str) -> Result<Vec<DirEntry>> {
        DosFS::list(self, path)
    }

    fn generate_tree(&self, path: &str, include_files: bool) -> Result<Vec<String>> {
        DosFS::generate_tree(self, path, include_files)
    }

    fn read(&self, path: &str) -> Result<&str> {
        DosFS::read(self, path)
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        DosFS::write(self, path, content)
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        DosFS::delete(self, path)
    }

    fn copy(&mut self, source: &str, destination: &str) -> Result<()> {
        DosFS::copy(self, source, destination)
    }

    fn rename(&mut self, path: &str, new_name: &str) -> Result<()> {
        DosFS::rename(self, path, new_name)
    }

    fn free_space(&self) -> u64 {
        DosFS::free_space(self)
    }
}
