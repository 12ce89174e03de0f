//! dirmap - Map a project directory into a Markdown document
//!
//! A run detects which well-known clutter (dependency folders, caches, build
//! output, editor files) is present, asks once whether to leave each one
//! out, remembers the answers next to the project, and writes a tree with
//! statistics to `Project_Directory.md`.

pub mod app;
pub mod configurator;
pub mod decisions;
pub mod fingerprint;
pub mod output;
pub mod patterns;
pub mod preferences;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// File name of the generated document.
pub const OUTPUT_FILE_NAME: &str = "Project_Directory.md";

/// File name of the saved preferences, kept in the project root.
pub const PREFERENCE_FILE_NAME: &str = ".dirmap_config.json";

pub use app::{RunOptions, RunOutcome, run};
pub use configurator::{DefaultPrompter, LinePrompter, Prompter, configure};
pub use decisions::DecisionSet;
pub use output::{MarkdownReport, ReportConfig, StatusPrinter, print_json, write_report};
pub use patterns::{PatternCandidate, PatternKey, PatternKind, PatternRegistry};
pub use preferences::{PreferenceDocument, ReconcileStatus, reconcile};
pub use tree::{ExclusionFilter, ScanResult, Scanner, SelfExclusion, detect_patterns};
