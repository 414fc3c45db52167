use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// A node of the filesystem tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entry {
    #[serde(rename = "dir")]
    Directory(DirNode),
    #[serde(rename = "file")]
    File(FileNode),
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        match self {
            Entry::Directory(_) => EntryType::Directory,
            Entry::File(_) => EntryType::File,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type() == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type() == EntryType::Directory
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Directory(dir) => &dir.name,
            Entry::File(file) => &file.name,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        match self {
            Entry::Directory(dir) => dir.created,
            Entry::File(file) => file.created,
        }
    }

    pub fn modified(&self) -> DateTime<Utc> {
        match self {
            Entry::Directory(dir) => dir.modified,
            Entry::File(file) => file.modified,
        }
    }

    /// Content length for files, 0 for directories.
    pub fn size(&self) -> u64 {
        match self {
            Entry::Directory(_) => 0,
            Entry::File(file) => file.size,
        }
    }

    pub fn as_dir(&self) -> Option<&DirNode> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub(crate) fn as_dir_mut(&mut self) -> Option<&mut DirNode> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        match self {
            Entry::Directory(dir) => dir.name = name.to_string(),
            Entry::File(file) => file.name = name.to_string(),
        }
    }
}

/// A directory and the entries it owns, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirNode {
    pub(crate) name: String,
    #[serde(with = "epoch_seconds")]
    pub(crate) created: DateTime<Utc>,
    #[serde(with = "epoch_seconds")]
    pub(crate) modified: DateTime<Utc>,
    #[serde(rename = "content")]
    pub(crate) children: IndexMap<String, Entry>,
}

impl DirNode {
    pub(crate) fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            created: now,
            modified: now,
            children: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Entry> {
        self.children.values()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// A file. `size` always equals the byte length of `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub(crate) name: String,
    #[serde(with = "epoch_seconds")]
    pub(crate) created: DateTime<Utc>,
    #[serde(with = "epoch_seconds")]
    pub(crate) modified: DateTime<Utc>,
    pub(crate) size: u64,
    pub(crate) content: String,
}

impl FileNode {
    pub(crate) fn new(name: &str, content: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            created: now,
            modified: now,
            size: content.len() as u64,
            content: content.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.size = content.len() as u64;
        self.modified = Utc::now();
    }
}

/// (De)serializes timestamps as fractional seconds since the Unix epoch.
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9;
        serializer.serialize_f64(seconds)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(D::Error::custom("timestamp is not a finite number"));
        }
        let whole = seconds.floor();
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", seconds)))
    }
}
