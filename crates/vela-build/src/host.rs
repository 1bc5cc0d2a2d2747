//! Compiler-host capabilities and the write-path decorators.
//!
//! The pipeline never writes a file directly: every physical write goes
//! through a `CompilerHost`, and emission goes through an `EmitWriter`.
//! Both decorators are plain forwarding types, not runtime patching:
//! `MetadataHost` adds an auxiliary metadata artifact per emitted module,
//! and `TrackedWriter` records manifest provenance before delegating to
//! the wrapped writer.

use crate::manifest::BuildManifest;

use log::debug;
use std::io;
use std::path::{Path, PathBuf};

/// Write capability plus file-name canonicalization, as provided by the
/// underlying toolchain. Implementations can be substituted in tests.
pub trait CompilerHost {
    /// Write an output file. `contributing` names the source module(s)
    /// the checker attributes to this output.
    fn write_file(
        &self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()>;

    /// Canonical form of a file name, as used for program identity
    fn canonical_file_name(&self, name: &str) -> String;
}

impl<H: CompilerHost + ?Sized> CompilerHost for &H {
    fn write_file(
        &self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()> {
        (**self).write_file(path, text, bom, contributing)
    }

    fn canonical_file_name(&self, name: &str) -> String {
        (**self).canonical_file_name(name)
    }
}

/// Host writing straight to the filesystem, creating parent directories
/// as needed.
#[derive(Debug, Default)]
pub struct DiskHost;

impl CompilerHost for DiskHost {
    fn write_file(
        &self,
        path: &Path,
        text: &str,
        bom: bool,
        _contributing: &[String],
    ) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if bom {
            let mut bytes = Vec::with_capacity(text.len() + 3);
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
            bytes.extend_from_slice(text.as_bytes());
            std::fs::write(path, bytes)
        } else {
            std::fs::write(path, text)
        }
    }

    fn canonical_file_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Suffix of auxiliary metadata artifacts
const METADATA_SUFFIX: &str = ".meta.json";

/// Decorator that additionally emits a JSON metadata companion for every
/// module written through it.
pub struct MetadataHost<H: CompilerHost> {
    inner: H,
}

impl<H: CompilerHost> MetadataHost<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    fn metadata_path(path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!("{stem}{METADATA_SUFFIX}"))
    }
}

impl<H: CompilerHost> CompilerHost for MetadataHost<H> {
    fn write_file(
        &self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()> {
        self.inner.write_file(path, text, bom, contributing)?;

        if path.to_string_lossy().ends_with(METADATA_SUFFIX) {
            return Ok(());
        }

        let metadata = serde_json::json!({
            "version": 1,
            "module": path.to_string_lossy(),
            "sources": contributing,
        });

        self.inner.write_file(
            &Self::metadata_path(path),
            &metadata.to_string(),
            false,
            contributing,
        )
    }

    fn canonical_file_name(&self, name: &str) -> String {
        self.inner.canonical_file_name(name)
    }
}

/// Per-file sink used during program emission
pub trait EmitWriter {
    fn write(
        &mut self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()>;
}

/// Adapter from a host's write capability to an `EmitWriter`
pub struct HostWriter<H: CompilerHost> {
    host: H,
}

impl<H: CompilerHost> HostWriter<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: CompilerHost> EmitWriter for HostWriter<H> {
    fn write(
        &mut self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()> {
        self.host.write_file(path, text, bom, contributing)
    }
}

/// Forwarder that extends the manifest for every file about to be
/// physically written, then delegates to the real writer.
pub struct TrackedWriter<'m, W: EmitWriter> {
    manifest: &'m mut BuildManifest,
    inner: W,
}

impl<'m, W: EmitWriter> TrackedWriter<'m, W> {
    pub fn new(manifest: &'m mut BuildManifest, inner: W) -> Self {
        Self { manifest, inner }
    }
}

impl<W: EmitWriter> EmitWriter for TrackedWriter<'_, W> {
    fn write(
        &mut self,
        path: &Path,
        text: &str,
        bom: bool,
        contributing: &[String],
    ) -> io::Result<()> {
        debug!("emit {} <- {:?}", path.display(), contributing);
        self.manifest.record(path, contributing);
        self.inner.write(path, text, bom, contributing)
    }
}
