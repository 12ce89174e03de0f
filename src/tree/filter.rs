//! Exclusion filtering for tree walking

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::decisions::DecisionSet;
use crate::patterns::{NameMatcher, PatternKind};

/// The tool's own artifacts, which never appear in a map.
///
/// Names match at any depth; paths match exactly.
#[derive(Debug, Clone, Default)]
pub struct SelfExclusion {
    names: BTreeSet<String>,
    paths: Vec<PathBuf>,
}

impl SelfExclusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default exclusions for a run rooted at `root`: the output document, the
    /// preference file, and the running executable if it lives under `root`.
    pub fn for_root(root: &Path) -> Self {
        let mut own = Self::new()
            .with_name(crate::OUTPUT_FILE_NAME)
            .with_name(crate::PREFERENCE_FILE_NAME);
        if let Ok(exe) = std::env::current_exe() {
            if exe.starts_with(root) {
                own = own.with_path(exe);
            }
        }
        own
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Check whether `path` is one of the tool's own artifacts.
    pub fn matches(&self, path: &Path) -> bool {
        let by_name = path
            .file_name()
            .is_some_and(|n| self.names.contains(n.to_string_lossy().as_ref()));
        by_name || self.paths.iter().any(|p| p == path)
    }
}

/// Why an entry was left out of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// One of the tool's own artifacts
    SelfArtifact,
    /// Matched a pattern the user chose to leave out
    Pattern,
}

/// Decides which entries a scan skips.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    directories: BTreeSet<String>,
    files: Vec<NameMatcher>,
    own: SelfExclusion,
}

impl ExclusionFilter {
    /// Build a filter from the excluded patterns in `decisions`.
    pub fn new(decisions: &DecisionSet, own: SelfExclusion) -> Self {
        let directories = decisions
            .excluded(PatternKind::Directory)
            .map(|k| k.name.clone())
            .collect();
        let files = decisions
            .excluded(PatternKind::File)
            .map(|k| NameMatcher::parse(&k.name))
            .collect();
        Self {
            directories,
            files,
            own,
        }
    }

    /// Classify a directory entry. `None` means the entry is kept.
    pub fn check(&self, path: &Path, is_dir: bool) -> Option<Exclusion> {
        if self.own.matches(path) {
            return Some(Exclusion::SelfArtifact);
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let excluded = if is_dir {
            self.directories.contains(&name)
        } else {
            self.files.iter().any(|m| m.matches(&name))
        };
        excluded.then_some(Exclusion::Pattern)
    }
}
