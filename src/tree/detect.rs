//! Find which registry patterns occur in a project
//!
//! Only patterns that actually occur are worth asking about. Detection walks
//! the whole tree once, including directories that match a directory
//! pattern, and records the item count of the first occurrence of each
//! detected directory as its display hint.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::patterns::{PatternKey, PatternRegistry};

use super::filter::SelfExclusion;
use super::utils::count_entries;

/// Return the subset of `registry` present under `root`, with count hints
/// for directory patterns.
pub fn detect_patterns(root: &Path, registry: &PatternRegistry, own: &SelfExclusion) -> PatternRegistry {
    let mut found = Detection::default();
    detect_in(root, registry, own, &mut found);

    let candidates = registry
        .candidates()
        .iter()
        .filter(|c| found.files.contains(&c.key) || found.directories.contains_key(&c.key))
        .map(|c| match found.directories.get(&c.key) {
            Some(count) => c.clone().with_count_hint(*count),
            None => c.clone(),
        })
        .collect();
    PatternRegistry::from_candidates(candidates)
}

#[derive(Default)]
struct Detection {
    /// Directory pattern -> item count of its first occurrence
    directories: BTreeMap<PatternKey, usize>,
    files: BTreeSet<PatternKey>,
}

fn detect_in(dir: &Path, registry: &PatternRegistry, own: &SelfExclusion, found: &mut Detection) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::debug!("detection skipped {}: {}", dir.display(), e);
            return;
        }
    };

    let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|a| a.file_name());

    for entry in entries {
        let path = entry.path();
        if own.matches(&path) {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        // File symlinks are listed by the scanner, so they can match file patterns
        let is_file_link = file_type.is_symlink() && fs::metadata(&path).is_ok_and(|m| m.is_file());
        if file_type.is_symlink() && !is_file_link {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if file_type.is_dir() {
            if let Some(candidate) = registry.match_directory(&name) {
                found
                    .directories
                    .entry(candidate.key.clone())
                    .or_insert_with(|| count_entries(&path));
            }
            // Matched directories may still be kept, so their contents count
            detect_in(&path, registry, own, found);
        } else {
            for candidate in registry.match_file(&name) {
                found.files.insert(candidate.key.clone());
            }
        }
    }
}
