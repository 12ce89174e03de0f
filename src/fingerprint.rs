//! Project fingerprinting for staleness detection
//!
//! The fingerprint is a short hash over the sorted names of the root's
//! immediate children. Two trees with the same top-level names collide; it
//! only needs to notice when a project's shape changed since preferences
//! were saved.

use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::tree::SelfExclusion;

/// Number of hex characters kept from the digest.
const FINGERPRINT_LEN: usize = 16;

/// Compute the fingerprint of the project at `root`.
///
/// Entries the tool writes itself are skipped, otherwise the first saved run
/// would invalidate its own preferences. Fails only if the root cannot be listed.
pub fn fingerprint(root: &Path, own: &SelfExclusion) -> io::Result<String> {
    let mut names: Vec<String> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .filter(|e| !own.matches(&e.path()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    Ok(fingerprint_names(&mut names))
}

/// Fingerprint a list of names. Order of the input does not matter.
pub fn fingerprint_names(names: &mut [String]) -> String {
    names.sort();

    let mut hasher = Sha256::new();
    for name in names.iter() {
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();

    let mut hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex.truncate(FINGERPRINT_LEN);
    hex
}
