//! Manifest entity - maps original asset names to published names
//!
//! It's a pure data structure - I/O operations are handled by ManifestRepository.

use std::collections::BTreeMap;

/// Normalize a name for manifest storage (always use forward slashes).
pub(crate) fn normalize_manifest_key(name: &str) -> String {
    name.replace('\\', "/")
}

/// The manifest records where each published asset ended up
///
/// Keys are original names (`app.js`, `/images/logo.png`); values are the
/// published, usually fingerprinted, names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-normalized entries (used by repositories)
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the published name for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Look up `name`, falling back to `default`
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Insert or replace an entry; the key's separators are normalized
    pub fn insert(&mut self, name: &str, published: impl Into<String>) {
        self.entries
            .insert(normalize_manifest_key(name), published.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(&normalize_manifest_key(name))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}
