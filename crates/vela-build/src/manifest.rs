//! The build manifest: provenance from every emitted artifact back to the
//! source module(s) that produced it, plus the resolved root sets.
//!
//! Entries are append-only within one compile; a second contribution to
//! the same emit path extends the module list instead of replacing it.
//! A `BTreeMap` keeps key order stable so serialized manifests are
//! reproducible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildManifest {
    /// Project base path
    base_path: PathBuf,
    /// Resolved entry-module identity ("<module file>#<Export>")
    entry_module: String,
    /// Ordered absolute source roots
    source_roots: Vec<PathBuf>,
    /// Ordered output roots (configured, re-based, process cwd)
    output_roots: Vec<PathBuf>,
    /// Emit path -> ordered contributing source modules
    emits: BTreeMap<String, Vec<String>>,
}

impl BuildManifest {
    /// Create an empty manifest at the start of emission planning
    pub fn new(
        base_path: impl Into<PathBuf>,
        entry_module: impl Into<String>,
        source_roots: Vec<PathBuf>,
        output_roots: Vec<PathBuf>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            entry_module: entry_module.into(),
            source_roots,
            output_roots,
            emits: BTreeMap::new(),
        }
    }

    /// Record that `path` was emitted on behalf of `sources`.
    ///
    /// Appends on an existing entry; nothing is ever overwritten or
    /// removed within one compile.
    pub fn record(&mut self, path: &Path, sources: &[String]) {
        self.emits
            .entry(path.to_string_lossy().into_owned())
            .or_default()
            .extend(sources.iter().cloned());
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn entry_module(&self) -> &str {
        &self.entry_module
    }

    pub fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }

    pub fn output_roots(&self) -> &[PathBuf] {
        &self.output_roots
    }

    /// Emitted paths in stable (lexicographic) order
    pub fn emitted_files(&self) -> impl Iterator<Item = &str> {
        self.emits.keys().map(String::as_str)
    }

    /// Contributing source modules for an emitted path
    pub fn sources_of(&self, path: &Path) -> Option<&[String]> {
        self.emits
            .get(path.to_string_lossy().as_ref())
            .map(Vec::as_slice)
    }

    /// Number of recorded emit paths
    pub fn len(&self) -> usize {
        self.emits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emits.is_empty()
    }

    /// Strip the first matching output-root prefix from an emitted path.
    ///
    /// Packaging consumers use this to place artifacts relative to
    /// whichever tree they were written into.
    pub fn relativize(&self, path: &Path) -> PathBuf {
        for root in &self.output_roots {
            if let Ok(stripped) = path.strip_prefix(root) {
                return stripped.to_path_buf();
            }
        }
        path.to_path_buf()
    }

    /// Serialize the manifest as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Persist the manifest for downstream packaging
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load a previously persisted manifest
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(std::io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manifest() -> BuildManifest {
        BuildManifest::new(
            "/p",
            "/p/src/app.vela#App",
            vec![PathBuf::from("/p/src")],
            vec![
                PathBuf::from("/p/build/out"),
                PathBuf::from("/w/build/out"),
                PathBuf::from("/cwd"),
            ],
        )
    }

    #[test]
    fn test_record_appends_on_collision() {
        let mut m = manifest();
        m.record(Path::new("/p/build/out/app.js"), &["/p/src/app.vela".into()]);
        m.record(
            Path::new("/p/build/out/app.js"),
            &["/p/src/app.view.vela".into()],
        );

        assert_eq!(m.len(), 1);
        assert_eq!(
            m.sources_of(Path::new("/p/build/out/app.js")).unwrap(),
            &[
                "/p/src/app.vela".to_string(),
                "/p/src/app.view.vela".to_string(),
            ]
        );
    }

    #[test]
    fn test_emitted_files_stable_order() {
        let mut m = manifest();
        m.record(Path::new("/p/build/out/b.js"), &["b".into()]);
        m.record(Path::new("/p/build/out/a.js"), &["a".into()]);

        let files: Vec<&str> = m.emitted_files().collect();
        assert_eq!(files, vec!["/p/build/out/a.js", "/p/build/out/b.js"]);
    }

    #[test]
    fn test_relativize_strips_first_matching_root() {
        let m = manifest();
        assert_eq!(
            m.relativize(Path::new("/w/build/out/app.js")),
            PathBuf::from("app.js")
        );
        assert_eq!(
            m.relativize(Path::new("/cwd/extra/app.js")),
            PathBuf::from("extra/app.js")
        );
        assert_eq!(
            m.relativize(Path::new("/unrelated/app.js")),
            PathBuf::from("/unrelated/app.js")
        );
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = manifest();
        m.record(Path::new("/p/build/out/app.js"), &["/p/src/app.vela".into()]);

        let path = dir.path().join("build-manifest.json");
        m.write_to_file(&path).unwrap();

        let loaded = BuildManifest::from_file(&path).unwrap();
        assert_eq!(loaded, m);
    }
}
