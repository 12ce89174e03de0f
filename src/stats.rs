//! Summaries derived from a scan: file-type ranking and a serialisable digest

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tree::{ScanResult, ScanTotals};

/// Number of extensions listed in the file-type summary.
pub const TOP_EXTENSIONS: usize = 10;

/// The most frequent extensions of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTypeSummary {
    /// `(extension, count)` by descending count, ties by extension name
    pub top: Vec<(String, usize)>,
    /// Number of extensions not listed in `top`
    pub remaining: usize,
}

impl FileTypeSummary {
    pub fn from_histogram(histogram: &BTreeMap<String, usize>, limit: usize) -> Self {
        let mut ranked: Vec<(String, usize)> =
            histogram.iter().map(|(ext, n)| (ext.clone(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let remaining = ranked.len().saturating_sub(limit);
        ranked.truncate(limit);
        Self {
            top: ranked,
            remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// Machine-readable digest of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub project: String,
    #[serde(flatten)]
    pub totals: ScanTotals,
    pub file_types: BTreeMap<String, usize>,
    pub warnings: usize,
}

impl ScanSummary {
    pub fn new(result: &ScanResult) -> Self {
        Self {
            project: result.root_name(),
            totals: result.totals,
            file_types: result.extension_histogram.clone(),
            warnings: result.warnings.len(),
        }
    }
}
