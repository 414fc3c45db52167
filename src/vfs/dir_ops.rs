use log::debug;

use crate::core::utils;
use crate::core::{FsError, Result};
use crate::vfs::entry::DirNode;
use crate::{DirEntry, DosFS, Entry};

impl DosFS {
    /// Changes the current directory.
    /// * `path` can be absolute (`C:\DOS`) or relative to the current directory, but it must
    ///   name an existing directory.
    ///
    /// On error the current directory is left as it was.
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        let segments = self.locate(path)?;
        match self.walk(&segments) {
            Some(Entry::Directory(_)) => {}
            Some(Entry::File(_)) => return Err(FsError::NotADirectory(path.to_string())),
            None => return Err(FsError::NotFound(path.to_string())),
        }
        debug!("cd {} -> {}", path, self.display_path(&segments));
        self.cwd = segments;
        Ok(())
    }

    /// Creates an empty directory.
    /// * `path` - the parent must already exist; only the final name is created.
    ///
    /// # Returns
    /// * `Err(FsError::InvalidName)` - the final name fails validation.
    /// * `Err(FsError::NotFound | FsError::NotADirectory)` - the parent is missing or is a file.
    /// * `Err(FsError::NameConflict)` - the parent already holds an entry with that name.
    /// * `Err(FsError::TooDeep)` - the directory would be nested too deep.
    pub fn create_directory(&mut self, path: &str) -> Result<()> {
        let (parent_segments, name) = self.locate_parent(path)?;
        if !utils::is_valid_name(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
        Self::check_depth(&parent_segments, path)?;
        let parent = self.expect_dir_mut(&parent_segments)?;
        if parent.children.contains_key(name) {
            return Err(FsError::NameConflict(path.to_string()));
        }
        parent
            .children
            .insert(name.to_string(), Entry::Directory(DirNode::new(name)));
        parent.touch();
        debug!("mkdir {}", path);
        Ok(())
    }

    /// Removes an empty directory. Removal is never recursive.
    ///
    /// # Returns
    /// * `Err(FsError::NotEmpty)` - the directory still has entries; nothing is changed.
    /// * `Err(FsError::NotADirectory)` - `path` names a file.
    /// * `Err(FsError::CurrentDirectory)` - `path` is the current directory.
    pub fn remove_directory(&mut self, path: &str) -> Result<()> {
        let (parent_segments, name) = self.locate_parent(path)?;
        if self.cwd.len() == parent_segments.len() + 1
            && self.cwd.starts_with(&parent_segments)
            && self.cwd.last().map(String::as_str) == Some(name)
        {
            return Err(FsError::CurrentDirectory(path.to_string()));
        }

        let parent = self.expect_dir_mut(&parent_segments)?;
        match parent.children.get(name) {
            None => return Err(FsError::NotFound(path.to_string())),
            Some(Entry::File(_)) => return Err(FsError::NotADirectory(path.to_string())),
            Some(Entry::Directory(dir)) if !dir.is_empty() => {
                return Err(FsError::NotEmpty(path.to_string()));
            }
            Some(Entry::Directory(_)) => {}
        }
        parent.children.shift_remove(name);
        parent.touch();
        debug!("rmdir {}", path);
        Ok(())
    }

    /// Lists a directory.
    ///
    /// The result starts with a `.` entry for the directory itself, then a `..` entry carrying
    /// the parent's timestamps (omitted at the root), then every child in insertion order.
    ///
    /// # Example:
    /// ```
    /// use dos_vfs::{DosFS, FsBackend};
    ///
    /// let fs = DosFS::new();
    /// let listing = fs.list("C:\\DOS").unwrap();
    /// let names: Vec<_> = listing.iter().map(|e| e.name()).collect();
    /// assert_eq!(names, [".", "..", "README.TXT"]);
    /// ```
    pub fn list(&self, path: &str) -> Result<Vec<DirEntry>> {
        let (segments, dir) = self.expect_dir(path)?;

        let mut entries = Vec::with_capacity(dir.len() + 2);
        entries.push(DirEntry::pseudo(".", dir.created, dir.modified));
        if segments.len() > 1 {
            let parent = self.walk(&segments[..segments.len() - 1]);
            let (created, modified) = parent
                .map(|p| (p.created(), p.modified()))
                .unwrap_or((dir.created, dir.modified));
            entries.push(DirEntry::pseudo("..", created, modified));
        }
        entries.extend(dir.children.values().map(DirEntry::from_entry));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn names(entries: &[DirEntry]) -> Vec<&str> {
        entries.iter().map(DirEntry::name).collect()
    }

    mod cd {
        use super::*;

        fn setup_test_vfs() -> DosFS {
            let mut fs = DosFS::new();
            fs.create_directory("HOME").unwrap();
            fs.create_directory("HOME\\USER").unwrap();
            fs.write("HOME\\USER\\CONFIG.SYS", "FILES=40").unwrap();
            fs
        }

        #[test]
        fn test_cd_absolute_path_success() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.change_directory("C:\\HOME\\USER")?;
            assert_eq!(fs.cwd(), ["C:", "HOME", "USER"]);
            assert_eq!(fs.current_path(), "C:\\HOME\\USER");
            Ok(())
        }

        #[test]
        fn test_cd_relative_path_success() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.change_directory("HOME")?;
            fs.change_directory("USER")?;
            assert_eq!(fs.current_path(), "C:\\HOME\\USER");
            Ok(())
        }

        #[test]
        fn test_cd_root_forms() -> Result<()> {
            let mut fs = setup_test_vfs();
            for root in ["C:", "C:\\", "c:/"] {
                fs.change_directory("HOME\\USER").ok();
                fs.change_directory(root)?;
                assert_eq!(fs.cwd(), ["C:"], "{root}");
            }
            Ok(())
        }

        #[test]
        fn test_cd_round_trip() -> Result<()> {
            let mut fs = setup_test_vfs();
            for start in ["C:", "C:\\HOME"] {
                fs.change_directory(start)?;
                let before = fs.cwd().to_vec();
                let sub = if start == "C:" { "HOME" } else { "USER" };
                fs.change_directory(sub)?;
                fs.change_directory("..")?;
                assert_eq!(fs.cwd(), before.as_slice());
            }
            Ok(())
        }

        #[test]
        fn test_cd_dot_and_dotdot() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.change_directory("HOME\\USER")?;
            fs.change_directory(".")?;
            assert_eq!(fs.current_path(), "C:\\HOME\\USER");
            fs.change_directory("..\\..\\DOS").unwrap_err();
            fs.change_directory("..")?;
            fs.change_directory("..\\DOS")?;
            assert_eq!(fs.current_path(), "C:\\DOS");
            fs.change_directory("C:")?;
            fs.change_directory("..")?;
            assert_eq!(fs.current_path(), "C:");
            Ok(())
        }

        #[test]
        fn test_cd_nonexistent_path_error() {
            let mut fs = setup_test_vfs();
            let result = fs.change_directory("C:\\NOWHERE");
            assert!(matches!(result, Err(FsError::NotFound(_))));
            assert!(result.unwrap_err().to_string().contains("does not exist"));
            assert_eq!(fs.cwd(), ["C:"]);
        }

        #[test]
        fn test_cd_file_path_error() {
            let mut fs = setup_test_vfs();
            let result = fs.change_directory("HOME\\USER\\CONFIG.SYS");
            assert!(matches!(result, Err(FsError::NotADirectory(_))));
            assert_eq!(fs.cwd(), ["C:"]);
        }

        #[test]
        fn test_cd_with_trailing_separator() -> Result<()> {
            let mut fs = setup_test_vfs();
            fs.change_directory("HOME\\")?;
            assert_eq!(fs.cwd(), ["C:", "HOME"]);
            fs.change_directory("C:\\HOME\\USER\\\\")?;
            assert_eq!(fs.cwd(), ["C:", "HOME", "USER"]);
            Ok(())
        }

        #[test]
        fn test_cd_is_case_sensitive() {
            let mut fs = setup_test_vfs();
            assert!(fs.change_directory("home").is_err());
        }
    }

    mod mkdir_rmdir {
        use super::*;

        #[test]
        fn test_mkdir_then_list_contains_once() -> Result<()> {
            let mut fs = DosFS::new();
            for name in ["NEWDIR", "with space", "x.y.z"] {
                fs.create_directory(name)?;
                let listing = fs.list(".")?;
                assert_eq!(names(&listing).iter().filter(|n| **n == name).count(), 1);
                assert!(matches!(
                    fs.create_directory(name),
                    Err(FsError::NameConflict(_))
                ));
            }
            Ok(())
        }

        #[test]
        fn test_mkdir_nested_requires_parent() {
            let mut fs = DosFS::new();
            let result = fs.create_directory("A\\B");
            assert!(matches!(result, Err(FsError::NotFound(_))));
            assert!(!fs.exists("A"));
        }

        #[test]
        fn test_mkdir_under_file() {
            let mut fs = DosFS::new();
            let result = fs.create_directory("C:\\DOS\\README.TXT\\SUB");
            assert!(matches!(result, Err(FsError::NotADirectory(_))));
        }

        #[test]
        fn test_mkdir_conflicts_with_file() {
            let mut fs = DosFS::new();
            let result = fs.create_directory("C:\\DOS\\README.TXT");
            assert!(matches!(result, Err(FsError::NameConflict(_))));
        }

        #[test]
        fn test_mkdir_invalid_names() {
            let mut fs = DosFS::new();
            for path in ["", "C:\\", "BAD?", "A*", "X\\..", "."] {
                let result = fs.create_directory(path);
                assert!(
                    matches!(result, Err(FsError::InvalidName(_))),
                    "{path}: {result:?}"
                );
            }
        }

        #[test]
        fn test_mkdir_touches_parent() -> Result<()> {
            let mut fs = DosFS::new();
            let long_ago = DateTime::from_timestamp(0, 0).unwrap();
            let dos = ["C:".to_string(), "DOS".to_string()];
            fs.walk_dir_mut(&dos, false).unwrap().modified = long_ago;

            fs.create_directory("DOS\\UTILS")?;
            assert!(fs.resolve("DOS").unwrap().modified() > long_ago);
            assert!(fs.is_dir("C:\\DOS\\UTILS")?);
            Ok(())
        }

        #[test]
        fn test_mkdir_too_deep() -> Result<()> {
            let mut fs = DosFS::new();
            let mut path = String::from("C:");
            for _ in 0..utils::MAX_DEPTH {
                path.push_str("\\D");
                fs.create_directory(&path)?;
            }
            path.push_str("\\D");
            let result = fs.create_directory(&path);
            assert!(matches!(result, Err(FsError::TooDeep { .. })));
            assert!(!fs.exists(&path));
            Ok(())
        }

        #[test]
        fn test_rmdir_empty() -> Result<()> {
            let mut fs = DosFS::new();
            fs.create_directory("TEMP")?;
            fs.remove_directory("TEMP")?;
            assert!(!fs.exists("TEMP"));
            assert_eq!(names(&fs.list("C:")?), [".", "DOS"]);
            Ok(())
        }

        #[test]
        fn test_rmdir_not_empty_leaves_state() -> Result<()> {
            let mut fs = DosFS::new();
            let before = fs.list("C:\\DOS")?;
            let result = fs.remove_directory("C:\\DOS");
            assert!(matches!(result, Err(FsError::NotEmpty(_))));
            assert_eq!(fs.list("C:\\DOS")?, before);
            assert!(fs.exists("C:\\DOS\\README.TXT"));
            Ok(())
        }

        #[test]
        fn test_rmdir_file() {
            let mut fs = DosFS::new();
            let result = fs.remove_directory("DOS\\README.TXT");
            assert!(matches!(result, Err(FsError::NotADirectory(_))));
        }

        #[test]
        fn test_rmdir_missing() {
            let mut fs = DosFS::new();
            assert!(matches!(fs.remove_directory("GHOST"), Err(FsError::NotFound(_))));
            assert!(matches!(fs.remove_directory("C:\\"), Err(FsError::NotFound(_))));
        }

        #[test]
        fn test_rmdir_current_directory() -> Result<()> {
            let mut fs = DosFS::new();
            fs.create_directory("TEMP")?;
            fs.change_directory("TEMP")?;
            let result = fs.remove_directory("C:\\TEMP");
            assert!(matches!(result, Err(FsError::CurrentDirectory(_))));
            fs.change_directory("..")?;
            fs.remove_directory("TEMP")?;
            Ok(())
        }

        #[test]
        fn test_rmdir_keeps_sibling_order() -> Result<()> {
            let mut fs = DosFS::new();
            for name in ["A", "B", "C"] {
                fs.create_directory(name)?;
            }
            fs.remove_directory("B")?;
            assert_eq!(names(&fs.list(".")?), [".", "DOS", "A", "C"]);
            Ok(())
        }
    }

    mod ls {
        use super::*;

        #[test]
        fn test_ls_root_has_no_parent_entry() -> Result<()> {
            let fs = DosFS::new();
            let listing = fs.list(".")?;
            assert_eq!(names(&listing), [".", "DOS"]);
            assert!(listing[0].is_dir() && listing[0].is_pseudo());
            assert_eq!(listing[0].size(), 0);
            Ok(())
        }

        #[test]
        fn test_ls_pseudo_entries_carry_timestamps() -> Result<()> {
            let fs = DosFS::new();
            let listing = fs.list("C:\\DOS")?;
            let dos = fs.resolve("C:\\DOS").unwrap();
            let root = fs.root();
            assert_eq!(listing[0].created(), dos.created());
            assert_eq!(listing[0].modified(), dos.modified());
            assert_eq!(listing[1].name(), "..");
            assert_eq!(listing[1].created(), root.created());
            assert_eq!(listing[1].modified(), root.modified());
            Ok(())
        }

        #[test]
        fn test_ls_children_in_insertion_order() -> Result<()> {
            let mut fs = DosFS::new();
            fs.write("ZETA.TXT", "z")?;
            fs.create_directory("ALPHA")?;
            fs.write("BETA.TXT", "bb")?;
            let listing = fs.list("C:")?;
            assert_eq!(names(&listing), [".", "DOS", "ZETA.TXT", "ALPHA", "BETA.TXT"]);
            assert_eq!(listing[4].size(), 2);
            assert!(listing[4].is_file());
            Ok(())
        }

        #[test]
        fn test_ls_relative_and_parent() -> Result<()> {
            let mut fs = DosFS::new();
            fs.change_directory("DOS")?;
            assert_eq!(names(&fs.list(".")?), [".", "..", "README.TXT"]);
            assert_eq!(names(&fs.list("..")?), [".", "DOS"]);
            Ok(())
        }

        #[test]
        fn test_ls_errors() {
            let fs = DosFS::new();
            assert!(matches!(fs.list("NOPE"), Err(FsError::NotFound(_))));
            assert!(matches!(
                fs.list("DOS\\README.TXT"),
                Err(FsError::NotADirectory(_))
            ));
        }

        #[test]
        fn test_seed_scenario() -> Result<()> {
            let mut fs = DosFS::new();
            let total = fs.total_space();
            assert_eq!(fs.free_space(), total - 177);

            fs.create_directory("NEWDIR")?;
            fs.write("NEWDIR\\A.TXT", "hi")?;

            assert_eq!(names(&fs.list(".")?), [".", "DOS", "NEWDIR"]);
            assert_eq!(fs.free_space(), total - 179);
            Ok(())
        }
    }
}
