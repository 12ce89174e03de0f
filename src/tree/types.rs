//! Scan result types

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Histogram key for files without an extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// One file or directory kept by a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    /// Path relative to the scan root
    pub path: PathBuf,
    pub name: String,
    /// Nesting level; immediate children of the root are at depth 1
    pub depth: usize,
    pub is_dir: bool,
    /// Size in bytes (zero for directories)
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Local>>,
    /// Lower-cased extension with its leading dot, e.g. `.py`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl ScanEntry {
    /// Histogram bucket for this entry.
    pub fn extension_key(&self) -> &str {
        self.extension.as_deref().unwrap_or(NO_EXTENSION)
    }
}

/// Running totals for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
    pub file_count: usize,
    pub dir_count: usize,
    pub total_size_bytes: u64,
    pub ignored_count: usize,
}

/// An entry the scan could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Everything a scan produced.
///
/// `entries` is in depth-first order with each directory immediately
/// followed by its contents, so it forms a tree through path prefixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub entries: Vec<ScanEntry>,
    pub totals: ScanTotals,
    pub extension_histogram: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Base name of the root directory.
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.to_string_lossy().to_string())
    }

    pub(crate) fn record_file(&mut self, entry: ScanEntry) {
        self.totals.file_count += 1;
        self.totals.total_size_bytes += entry.size_bytes;
        *self
            .extension_histogram
            .entry(entry.extension_key().to_string())
            .or_insert(0) += 1;
        self.entries.push(entry);
    }

    pub(crate) fn record_dir(&mut self, entry: ScanEntry) {
        self.totals.dir_count += 1;
        self.entries.push(entry);
    }

    pub(crate) fn record_ignored(&mut self, count: usize) {
        self.totals.ignored_count += count;
    }

    pub(crate) fn warn(&mut self, path: PathBuf, message: impl Into<String>) {
        let message = message.into();
        log::warn!("skipping {}: {}", path.display(), message);
        self.warnings.push(ScanWarning { path, message });
    }

    /// Number of kept entries nested under the directory at `index`.
    pub fn descendant_count(&self, index: usize) -> usize {
        let Some(dir) = self.entries.get(index) else {
            return 0;
        };
        self.entries[index + 1..]
            .iter()
            .take_while(|e| e.depth > dir.depth)
            .count()
    }
}
