//! The resolved include/exclude choice for every known pattern

use std::collections::BTreeMap;

use crate::patterns::{PatternKey, PatternKind};

/// Mapping from pattern to its include flag. `false` means the pattern's
/// matches are left out of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionSet {
    decisions: BTreeMap<PatternKey, bool>,
}

impl DecisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PatternKey, include: bool) {
        self.decisions.insert(key, include);
    }

    /// Record that `key` should be left out.
    pub fn exclude(&mut self, key: PatternKey) {
        self.insert(key, false);
    }

    pub fn include(&mut self, key: PatternKey) {
        self.insert(key, true);
    }

    /// The include flag for `key`, if a decision exists.
    pub fn get(&self, key: &PatternKey) -> Option<bool> {
        self.decisions.get(key).copied()
    }

    pub fn contains(&self, key: &PatternKey) -> bool {
        self.decisions.contains_key(key)
    }

    pub fn is_excluded(&self, key: &PatternKey) -> bool {
        self.get(key) == Some(false)
    }

    /// Keep only decisions for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&PatternKey) -> bool) {
        self.decisions.retain(|key, _| keep(key));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatternKey, bool)> {
        self.decisions.iter().map(|(k, v)| (k, *v))
    }

    /// Patterns of `kind` whose matches are left out.
    pub fn excluded(&self, kind: PatternKind) -> impl Iterator<Item = &PatternKey> {
        self.decisions
            .iter()
            .filter(move |(k, include)| k.kind == kind && !**include)
            .map(|(k, _)| k)
    }

    pub fn excluded_count(&self) -> usize {
        self.decisions.values().filter(|include| !**include).count()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

impl FromIterator<(PatternKey, bool)> for DecisionSet {
    fn from_iter<I: IntoIterator<Item = (PatternKey, bool)>>(iter: I) -> Self {
        Self {
            decisions: iter.into_iter().collect(),
        }
    }
}
