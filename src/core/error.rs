use thiserror::Error;

/// Errors reported by filesystem operations.
///
/// Everything except [`FsError::CorruptState`] is an ordinary negative result: the operation
/// did nothing and the caller may report it and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Path does not resolve to any entry.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Entry exists but is a file where a directory was required.
    #[error("{0} is not a directory")]
    NotADirectory(String),

    /// Entry exists but is a directory where a file was required.
    #[error("{0} is a directory")]
    NotAFile(String),

    /// Destination name is already taken in the target directory.
    #[error("{0} already exists")]
    NameConflict(String),

    #[error("invalid name: '{0}'")]
    InvalidName(String),

    /// Path uses a relative marker or drive the resolver does not understand.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("directory {0} is not empty")]
    NotEmpty(String),

    #[error("cannot remove the current directory: {0}")]
    CurrentDirectory(String),

    /// Entry would sit more than [`MAX_DEPTH`](crate::core::utils::MAX_DEPTH) names below the
    /// drive.
    #[error("{path} is nested deeper than {max} levels")]
    TooDeep { path: String, max: usize },

    #[error("insufficient disk space: {required} bytes required, {available} bytes available")]
    InsufficientSpace { required: u64, available: u64 },

    /// A snapshot could not be parsed or breaks the tree invariants.
    #[error("corrupt snapshot: {0}")]
    CorruptState(String),
}

impl FsError {
    /// True for type mismatches (file where a directory was needed or vice versa).
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, FsError::NotADirectory(_) | FsError::NotAFile(_))
    }
}

impl From<serde_json::Error> for FsError {
    fn from(error: serde_json::Error) -> Self {
        FsError::CorruptState(error.to_string())
    }
}
