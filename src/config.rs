use serde::{Deserialize, Serialize};

/// Default volume size: 10 MiB.
pub const DEFAULT_TOTAL_SPACE: u64 = 10 * 1024 * 1024;

/// Construction settings for [`DosFS`](crate::DosFS).
///
/// ```
/// use dos_vfs::{DosFS, FsBackend, FsConfig};
///
/// let config = FsConfig::default().with_drive('a').with_total_space(1440 * 1024).with_seed(false);
/// let fs = DosFS::with_config(config).unwrap();
/// assert_eq!(fs.current_path(), "A:");
/// assert_eq!(fs.free_space(), 1440 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Drive letter of the single volume.
    pub drive: char,
    /// Volume capacity in bytes.
    pub total_space: u64,
    /// Whether to create the `DOS\README.TXT` seed tree.
    pub seed: bool,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            drive: 'C',
            total_space: DEFAULT_TOTAL_SPACE,
            seed: true,
        }
    }
}

impl FsConfig {
    pub fn with_drive(mut self, drive: char) -> Self {
        self.drive = drive;
        self
    }

    pub fn with_total_space(mut self, total_space: u64) -> Self {
        self.total_space = total_space;
        self
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Drive token for the root, e.g. `C:`.
    pub(crate) fn drive_token(&self) -> String {
        format!("{}:", self.drive.to_ascii_uppercase())
    }
}
