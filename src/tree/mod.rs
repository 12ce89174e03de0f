//! Directory scanning
//!
//! `Scanner` walks a project tree depth-first and returns a `ScanResult`
//! describing every entry it kept. What to skip is decided up front by an
//! `ExclusionFilter` built from the resolved decisions, so the walk itself
//! never prompts and can be tested with constructed inputs.

mod detect;
mod filter;
mod types;
mod utils;
mod walker;

pub use detect::detect_patterns;
pub use filter::{Exclusion, ExclusionFilter, SelfExclusion};
pub use types::{NO_EXTENSION, ScanEntry, ScanResult, ScanTotals, ScanWarning};
pub use utils::{count_entries, extension_of, format_size};
pub use walker::Scanner;
