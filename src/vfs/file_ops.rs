use indexmap::map::Entry as Slot;
use log::debug;

use crate::core::utils;
use crate::core::{FsError, Result};
use crate::vfs::entry::{DirNode, FileNode};
use crate::{DosFS, Entry};

impl DosFS {
    /// Reads the entire contents of a file.
    ///
    /// # Returns
    /// * `Err(FsError::NotFound)` - nothing lives at `path`.
    /// * `Err(FsError::NotAFile)` - `path` is a directory.
    pub fn read(&self, path: &str) -> Result<&str> {
        let segments = self.locate(path)?;
        match self.walk(&segments) {
            Some(Entry::File(file)) => Ok(file.content()),
            Some(Entry::Directory(_)) => Err(FsError::NotAFile(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    /// Writes `content` to a file, creating the file if needed and replacing what was there.
    /// * `path` - missing directories on the way to the file are created.
    ///
    /// The capacity check credits the size of the file being replaced, so overwriting a file
    /// only needs room for the difference. When the check fails nothing is created or changed.
    ///
    /// # Returns
    /// * `Err(FsError::InvalidName)` - the file name or a directory to create is invalid.
    /// * `Err(FsError::NotADirectory)` - a file sits where a directory is needed.
    /// * `Err(FsError::NotAFile)` - `path` names a directory.
    /// * `Err(FsError::TooDeep)` - the file would be nested too deep.
    /// * `Err(FsError::InsufficientSpace)` - the volume cannot hold the new content.
    pub fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let (parent_segments, name) = self.locate_parent(path)?;
        if !utils::is_valid_name(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
        if let Some(bad) = parent_segments.iter().skip(1).find(|s| !utils::is_valid_name(s)) {
            return Err(FsError::InvalidName(bad.clone()));
        }
        Self::check_depth(&parent_segments, path)?;

        let existing_size = match self.probe(&parent_segments)?.and_then(|dir| dir.get(name)) {
            Some(Entry::File(file)) => file.size(),
            Some(Entry::Directory(_)) => return Err(FsError::NotAFile(path.to_string())),
            None => 0,
        };

        let new_size = content.len() as u64;
        let reusable = self.used_space().saturating_sub(existing_size);
        let available = self.total_space.saturating_sub(reusable);
        if new_size > available {
            return Err(FsError::InsufficientSpace {
                required: new_size,
                available,
            });
        }

        let parent = self
            .walk_dir_mut(&parent_segments, true)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        match parent.children.entry(name.to_string()) {
            Slot::Occupied(mut slot) => match slot.get_mut() {
                Entry::File(file) => file.set_content(content),
                Entry::Directory(_) => return Err(FsError::NotAFile(path.to_string())),
            },
            Slot::Vacant(slot) => {
                slot.insert(Entry::File(FileNode::new(name, content)));
            }
        }
        parent.touch();
        debug!("write {} ({} bytes)", path, new_size);
        Ok(())
    }

    /// Deletes a file. Directories are removed with
    /// [`remove_directory`](Self::remove_directory).
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let (parent_segments, name) = self.locate_parent(path)?;
        let parent = self.expect_dir_mut(&parent_segments)?;
        match parent.children.get(name) {
            Some(Entry::File(_)) => {}
            Some(Entry::Directory(_)) => return Err(FsError::NotAFile(path.to_string())),
            None => return Err(FsError::NotFound(path.to_string())),
        }
        parent.children.shift_remove(name);
        parent.touch();
        debug!("delete {}", path);
        Ok(())
    }

    /// Copies a file by reading `source` and writing its content to `destination`.
    pub fn copy(&mut self, source: &str, destination: &str) -> Result<()> {
        let content = self.read(source)?.to_string();
        self.write(destination, &content)?;
        debug!("copy {} -> {}", source, destination);
        Ok(())
    }

    /// Gives a file or directory a new name inside the same parent.
    ///
    /// The entry keeps its position among its siblings. Renaming the current directory (or one
    /// of its ancestors) updates the current path to follow it.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<()> {
        if !utils::is_valid_name(new_name) {
            return Err(FsError::InvalidName(new_name.to_string()));
        }
        let (parent_segments, old_name) = self.locate_parent(path)?;
        let parent = self.expect_dir_mut(&parent_segments)?;
        if !parent.children.contains_key(old_name) {
            return Err(FsError::NotFound(path.to_string()));
        }
        if parent.children.contains_key(new_name) {
            return Err(FsError::NameConflict(new_name.to_string()));
        }

        if let Some((index, _, mut entry)) = parent.children.shift_remove_full(old_name) {
            entry.set_name(new_name);
            parent.children.shift_insert(index, new_name.to_string(), entry);
        }
        parent.touch();

        let depth = parent_segments.len();
        if self.cwd.len() > depth
            && self.cwd.starts_with(&parent_segments)
            && self.cwd[depth] == old_name
        {
            self.cwd[depth] = new_name.to_string();
        }
        debug!("rename {} -> {}", path, new_name);
        Ok(())
    }

    /// Walks as far as `segments` exist without creating anything.
    ///
    /// Returns `Ok(None)` when a directory along the way is missing and
    /// `Err(NotADirectory)` when a file is in the way.
    fn probe(&self, segments: &[String]) -> Result<Option<&DirNode>> {
        let mut current = &self.root;
        for (depth, name) in segments.iter().enumerate().skip(1) {
            let dir = current
                .as_dir()
                .ok_or_else(|| FsError::NotADirectory(self.display_path(&segments[..depth])))?;
            match dir.get(name) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        match current {
            Entry::Directory(dir) => Ok(Some(dir)),
            Entry::File(_) => Err(FsError::NotADirectory(self.display_path(segments))),
        }
    }
}
