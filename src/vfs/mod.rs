mod dir_entry;
mod dir_ops;
mod dos_fs;
mod entry;
mod file_ops;
mod render;
mod snapshot;

pub use dir_entry::{DirEntry, ListingSummary};
pub use dos_fs::DosFS;
pub use entry::{DirNode, Entry, EntryType, FileNode};
pub use snapshot::Snapshot;
