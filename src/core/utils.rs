//! Path syntax helpers shared by the filesystem implementation.
//!
//! Nothing here looks at filesystem state: the functions only take strings apart.

/// Separator used in normalized paths.
pub const SEPARATOR: char = '\\';

/// Longest accepted entry name.
pub const MAX_NAME_LEN: usize = 255;

/// Deepest accepted entry, counted in names below the drive (`C:\A\B.TXT` is 2).
///
/// Keeps every tree a snapshot can hold within what the JSON reader accepts.
pub const MAX_DEPTH: usize = 32;

const INVALID_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Splits a DOS-style path into its segments.
///
/// Both `/` and `\` are accepted as separators. When the first segment carries a drive marker
/// (`:`), it is cut down to its first two characters and upper-cased, so `c:stuff` becomes `C:`.
/// Empty segments (from doubled or trailing separators) are kept; resolution skips them.
///
/// ```
/// use dos_vfs::parse_path;
///
/// assert_eq!(parse_path("c:/dos/readme.txt"), vec!["C:", "dos", "readme.txt"]);
/// assert_eq!(parse_path("..\\games"), vec!["..", "games"]);
/// assert!(parse_path("").is_empty());
/// ```
pub fn parse_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let normalized = path.replace('/', "\\");
    let mut parts: Vec<String> = normalized.split(SEPARATOR).map(str::to_string).collect();
    if let Some(first) = parts.first_mut() {
        if first.contains(':') {
            *first = first.chars().take(2).collect::<String>().to_uppercase();
        }
    }
    parts
}

/// Returns true if `segment` is a drive token such as `C:`.
pub fn is_drive_token(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}

/// Checks whether `name` can be used as a file or directory name.
///
/// Rejects empty names, `.` and `..`, names with any of `< > : " / \ | ? *`
/// and names longer than [`MAX_NAME_LEN`] characters.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains(INVALID_NAME_CHARS) {
        return false;
    }
    name.chars().count() <= MAX_NAME_LEN
}

/// Splits `path` into its parent part and final name at the last separator.
///
/// The parent is empty when `path` has no separator.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind(['\\', '/']) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Formats a byte count the way directory listings print it.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} bytes", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
