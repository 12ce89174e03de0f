//! Persisted include/exclude preferences
//!
//! The preference file is a convenience cache stored beside the project: a
//! missing or corrupt file simply means "ask again". Values on disk are
//! *ignore* flags (`true` = leave out), the inverse of the in-memory
//! include flag held by [`DecisionSet`].

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::decisions::DecisionSet;
use crate::patterns::{PatternCandidate, PatternKey, PatternKind, PatternRegistry};

/// Schema version written into new documents.
pub const SCHEMA_VERSION: &str = "1.0";

/// Ignore flags grouped by pattern kind, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnorePatterns {
    #[serde(default)]
    pub directories: BTreeMap<String, bool>,
    #[serde(default)]
    pub files: BTreeMap<String, bool>,
}

/// The saved preference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDocument {
    pub version: String,
    pub created: DateTime<Local>,
    #[serde(default)]
    pub ignore_patterns: IgnorePatterns,
    /// Fingerprint of the project when the document was written
    #[serde(default)]
    pub project_hash: Option<String>,
}

impl PreferenceDocument {
    /// Build a document from in-memory decisions.
    pub fn new(decisions: &DecisionSet, fingerprint: &str, created: DateTime<Local>) -> Self {
        let mut ignore_patterns = IgnorePatterns::default();
        for (key, include) in decisions.iter() {
            let group = match key.kind {
                PatternKind::Directory => &mut ignore_patterns.directories,
                PatternKind::File => &mut ignore_patterns.files,
            };
            group.insert(key.name.clone(), !include);
        }
        Self {
            version: SCHEMA_VERSION.to_string(),
            created,
            ignore_patterns,
            project_hash: Some(fingerprint.to_string()),
        }
    }

    /// The saved choices as include flags.
    pub fn decisions(&self) -> DecisionSet {
        let directories = self
            .ignore_patterns
            .directories
            .iter()
            .map(|(name, ignore)| (PatternKey::directory(name.as_str()), !ignore));
        let files = self
            .ignore_patterns
            .files
            .iter()
            .map(|(name, ignore)| (PatternKey::file(name.as_str()), !ignore));
        directories.chain(files).collect()
    }

    pub fn matches_fingerprint(&self, fingerprint: &str) -> bool {
        self.project_hash.as_deref() == Some(fingerprint)
    }
}

/// Load the document at `path`. Any failure yields `None`.
pub fn load(path: &Path) -> Option<PreferenceDocument> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Write `decisions` to `path`, replacing any previous document.
///
/// The document is written to a temporary file in the same directory and
/// renamed into place, so a reader never sees a half-written file.
pub fn save(path: &Path, decisions: &DecisionSet, fingerprint: &str) -> io::Result<()> {
    let doc = PreferenceDocument::new(decisions, fingerprint, Local::now());
    let json = serde_json::to_string_pretty(&doc).map_err(io::Error::other)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Why reconciliation produced its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// No saved document
    Fresh,
    /// A document exists but was saved for a differently shaped project
    Stale,
    /// The document applies to this project
    Current,
}

/// Saved decisions that still apply, and the patterns that need asking.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub status: ReconcileStatus,
    pub known: DecisionSet,
    /// Candidates without a saved decision, in registry order
    pub unresolved: Vec<PatternCandidate>,
}

/// Match a loaded document against the registry and the current fingerprint.
///
/// A missing or stale document leaves every registry pattern unresolved.
/// Otherwise saved decisions for patterns no longer in the registry are
/// dropped, and registry patterns absent from the document are unresolved.
pub fn reconcile(
    document: Option<&PreferenceDocument>,
    registry: &PatternRegistry,
    fingerprint: &str,
) -> Reconciliation {
    let doc = match document {
        None => {
            return Reconciliation {
                status: ReconcileStatus::Fresh,
                known: DecisionSet::new(),
                unresolved: registry.candidates().to_vec(),
            };
        }
        Some(doc) if !doc.matches_fingerprint(fingerprint) => {
            return Reconciliation {
                status: ReconcileStatus::Stale,
                known: DecisionSet::new(),
                unresolved: registry.candidates().to_vec(),
            };
        }
        Some(doc) => doc,
    };

    let mut known = doc.decisions();
    known.retain(|key| registry.contains(key));

    let unresolved = registry
        .candidates()
        .iter()
        .filter(|c| !known.contains(&c.key))
        .cloned()
        .collect();

    Reconciliation {
        status: ReconcileStatus::Current,
        known,
        unresolved,
    }
}
