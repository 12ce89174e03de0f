//! Shared utility functions for tree walking

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

/// Lower-cased extension of `name` with a leading dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Modification time of `meta` in local time, if the platform reports one.
pub fn modified_time(meta: &fs::Metadata) -> Option<DateTime<Local>> {
    meta.modified().ok().map(DateTime::<Local>::from)
}

/// Count every entry nested below `path` without following symlinks.
///
/// Unreadable parts of the subtree are skipped silently.
pub fn count_entries(path: &Path) -> usize {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };

    let mut count = 0;
    for entry in entries.flatten() {
        count += 1;
        let is_real_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_real_dir {
            count += count_entries(&entry.path());
        }
    }
    count
}

/// Format a size in bytes with binary prefixes, e.g. `1.50 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.2} {}", size, unit)
}
