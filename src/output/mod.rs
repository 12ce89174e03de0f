//! Report formatting and display
//!
//! - `config` - Report configuration and display constants
//! - `icons` - File type icon table
//! - `json` - Machine-readable scan digest
//! - `markdown` - The Markdown project document
//! - `status` - Colored status lines for the terminal

mod config;
mod icons;
mod json;
mod markdown;
mod status;

pub use config::{LARGE_DIR_THRESHOLD, ReportConfig, TIMESTAMP_FORMAT};
pub use icons::{DEFAULT_ICON, DIRECTORY_ICON, ICON_GROUPS, IconGroup, icon_for};
pub use json::print_json;
pub use markdown::{MarkdownReport, write_report};
pub use status::StatusPrinter;
