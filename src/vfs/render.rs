use crate::core::Result;
use crate::vfs::entry::DirNode;
use crate::{DosFS, Entry};

const BRANCH: &str = "├───";
const LAST_BRANCH: &str = "└───";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

impl DosFS {
    /// Renders the directory tree below `path` the way the `TREE` command prints it.
    ///
    /// Each directory's children are sorted directories first, then by case-insensitive name.
    /// Files appear as leaves only when `include_files` is set. The directory at `path` itself
    /// is not part of the output.
    ///
    /// # Example:
    /// ```
    /// use dos_vfs::{DosFS, FsBackend};
    ///
    /// let mut fs = DosFS::new();
    /// fs.create_directory("GAMES").unwrap();
    /// let lines = fs.generate_tree("C:", false).unwrap();
    /// assert_eq!(lines, ["├───DOS", "└───GAMES"]);
    /// assert_eq!(
    ///     fs.generate_tree("C:", true).unwrap(),
    ///     ["├───DOS", "│   └───README.TXT", "└───GAMES"]
    /// );
    /// ```
    pub fn generate_tree(&self, path: &str, include_files: bool) -> Result<Vec<String>> {
        let (_, dir) = self.expect_dir(path)?;
        let mut lines = Vec::new();
        render_dir(dir, include_files, "", &mut lines);
        Ok(lines)
    }
}

fn render_dir(dir: &DirNode, include_files: bool, prefix: &str, lines: &mut Vec<String>) {
    let mut visible: Vec<&Entry> = dir
        .children()
        .filter(|entry| include_files || entry.is_dir())
        .collect();
    visible.sort_by_cached_key(|entry| (entry.is_file(), entry.name().to_uppercase()));

    let count = visible.len();
    for (i, entry) in visible.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let (branch, indent) = if is_last {
            (LAST_BRANCH, BLANK)
        } else {
            (BRANCH, PIPE)
        };
        lines.push(format!("{}{}{}", prefix, branch, entry.name()));
        if let Entry::Directory(sub) = entry {
            render_dir(sub, include_files, &format!("{}{}", prefix, indent), lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FsError;
    use crate::FsConfig;

    fn setup_test_vfs() -> DosFS {
        let mut fs = DosFS::with_config(FsConfig::default().with_seed(false)).unwrap();
        fs.write("ROOT.TXT", "r").unwrap();
        fs.create_directory("beta").unwrap();
        fs.create_directory("Alpha").unwrap();
        fs.create_directory("Alpha\\Inner").unwrap();
        fs.write("Alpha\\Inner\\deep.txt", "d").unwrap();
        fs.write("Alpha\\a.txt", "a").unwrap();
        fs
    }

    #[test]
    fn test_two_dirs_one_file_without_files() -> Result<()> {
        let mut fs = DosFS::with_config(FsConfig::default().with_seed(false))?;
        fs.write("FILE.TXT", "x")?;
        fs.create_directory("zeta")?;
        fs.create_directory("Beta")?;
        let lines = fs.generate_tree("C:", false)?;
        assert_eq!(lines, ["├───Beta", "└───zeta"]);
        Ok(())
    }

    #[test]
    fn test_directories_only() -> Result<()> {
        let fs = setup_test_vfs();
        let lines = fs.generate_tree(".", false)?;
        assert_eq!(lines, ["├───Alpha", "│   └───Inner", "└───beta"]);
        Ok(())
    }

    #[test]
    fn test_with_files() -> Result<()> {
        let fs = setup_test_vfs();
        let lines = fs.generate_tree("C:\\", true)?;
        assert_eq!(
            lines,
            [
                "├───Alpha",
                "│   ├───Inner",
                "│   │   └───deep.txt",
                "│   └───a.txt",
                "├───beta",
                "└───ROOT.TXT",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_last_branch_indent_is_blank() -> Result<()> {
        let fs = setup_test_vfs();
        let lines = fs.generate_tree("Alpha", true)?;
        assert_eq!(lines, ["├───Inner", "│   └───deep.txt", "└───a.txt"]);
        let lines = fs.generate_tree("Alpha\\Inner", true)?;
        assert_eq!(lines, ["└───deep.txt"]);
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> Result<()> {
        let fs = setup_test_vfs();
        assert!(fs.generate_tree("beta", true)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_tree_errors() {
        let fs = setup_test_vfs();
        assert!(matches!(fs.generate_tree("NOPE", false), Err(FsError::NotFound(_))));
        assert!(matches!(
            fs.generate_tree("ROOT.TXT", false),
            Err(FsError::NotADirectory(_))
        ));
    }
}
