//! Report configuration types

use chrono::{DateTime, Local};

use crate::stats::TOP_EXTENSIONS;

/// Directories with more nested entries than this are annotated in the tree.
pub const LARGE_DIR_THRESHOLD: usize = 100;

/// Display format for every timestamp in the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for report rendering.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Shown in the header; injected so rendering stays deterministic
    pub generated_at: DateTime<Local>,
    pub top_extensions: usize,
    pub large_dir_threshold: usize,
}

impl ReportConfig {
    pub fn new(generated_at: DateTime<Local>) -> Self {
        Self {
            generated_at,
            top_extensions: TOP_EXTENSIONS,
            large_dir_threshold: LARGE_DIR_THRESHOLD,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(Local::now())
    }
}
