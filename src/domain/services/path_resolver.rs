//! Path resolver
//!
//! Maps a logical path (`js/app`, `vendor/jquery.js`) onto one concrete file
//! by searching an ordered list of roots.

use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;

/// Ordered search roots plus the extensions tried on extension-less names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathResolver {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl PathResolver {
    pub fn new(roots: Vec<PathBuf>, extensions: Vec<String>) -> Self {
        Self { roots, extensions }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve `logical` to an absolute path
    ///
    /// Absolute input is canonicalized and returned without an existence
    /// check. Relative input is looked up root by root: the literal name
    /// first, then the name with each recognized extension appended.
    /// A directory hit resolves to its `index` file when there is one and to
    /// the directory itself otherwise.
    pub fn resolve(&self, fs: &dyn FileSystem, logical: &str) -> Option<PathBuf> {
        self.resolve_preferring(fs, logical, None)
    }

    /// Like [`resolve`](Self::resolve), trying `preferred_ext` first when
    /// looking for a directory's index file
    pub fn resolve_preferring(
        &self,
        fs: &dyn FileSystem,
        logical: &str,
        preferred_ext: Option<&str>,
    ) -> Option<PathBuf> {
        if logical.is_empty() {
            return None;
        }

        let path = Path::new(logical);
        if path.is_absolute() {
            let resolved = fs.canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            return Some(self.apply_index_rule(fs, resolved, preferred_ext));
        }

        let found = self.roots.iter().find_map(|root| {
            self.candidates(root, logical)
                .into_iter()
                .find(|candidate| fs.exists(candidate))
        })?;

        let found = fs.canonicalize(&found).unwrap_or(found);
        tracing::trace!(logical, resolved = %found.display(), "resolved logical path");
        Some(self.apply_index_rule(fs, found, preferred_ext))
    }

    /// Look `relative` up inside `base` alone, with the same candidate order
    /// and index rule as a root search
    pub fn resolve_in(
        &self,
        fs: &dyn FileSystem,
        base: &Path,
        relative: &str,
        preferred_ext: Option<&str>,
    ) -> Option<PathBuf> {
        let found = self
            .candidates(base, relative)
            .into_iter()
            .find(|candidate| fs.exists(candidate))?;
        let found = fs.canonicalize(&found).unwrap_or(found);
        Some(self.apply_index_rule(fs, found, preferred_ext))
    }

    /// Resolve `logical` to a directory, skipping extensions and index files
    pub fn resolve_directory(&self, fs: &dyn FileSystem, logical: &str) -> Option<PathBuf> {
        let path = Path::new(logical);
        let found = if path.is_absolute() {
            Some(path.to_path_buf()).filter(|p| fs.is_dir(p))
        } else {
            self.roots
                .iter()
                .map(|root| root.join(logical))
                .find(|candidate| fs.is_dir(candidate))
        }?;
        Some(fs.canonicalize(&found).unwrap_or(found))
    }

    /// The `index<ext>` file inside `dir`, if any
    pub fn directory_index(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        preferred_ext: Option<&str>,
    ) -> Option<PathBuf> {
        preferred_ext
            .into_iter()
            .chain(self.extensions.iter().map(String::as_str))
            .map(|ext| dir.join(format!("index{}", ext)))
            .find(|index| fs.is_file(index))
    }

    fn apply_index_rule(
        &self,
        fs: &dyn FileSystem,
        path: PathBuf,
        preferred_ext: Option<&str>,
    ) -> PathBuf {
        if fs.is_dir(&path) {
            self.directory_index(fs, &path, preferred_ext)
                .unwrap_or(path)
        } else {
            path
        }
    }

    fn candidates(&self, root: &Path, logical: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(self.extensions.len() + 1);
        candidates.push(root.join(logical));
        for ext in &self.extensions {
            candidates.push(root.join(format!("{}{}", logical, ext)));
        }
        candidates
    }
}
