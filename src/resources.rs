//! Bundled resource resolution
//!
//! The plugin ships a fixed directory tree of templates, patches, and task
//! scripts. This module resolves paths inside that tree and reads file
//! contents at plugin load. Resolution is purely path-based: a missing file
//! is a [`ExtensionError::ResourceNotFound`], an unreadable one an
//! [`ExtensionError::Io`], and either aborts the load.
//!
//! # Resource tree layout
//!
//! ```text
//! resources/
//! ├── patches/
//! │   └── <marker-name>        # one patch per file, named after its marker
//! └── templates/
//!     └── philu-extensions/
//!         ├── apps/
//!         ├── build/
//!         ├── k8s/
//!         └── tasks/<service>/<script>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ExtensionError, Result};

/// Environment variable overriding the resource root location.
pub const RESOURCES_ENV_VAR: &str = "PHILU_EXTENSIONS_RESOURCES";

/// Default resource tree shipped alongside the crate.
const BUNDLED_RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

/// The base directory of the plugin's bundled resource tree.
#[derive(Debug, Clone)]
pub struct ResourceRoot {
    base: PathBuf,
}

impl ResourceRoot {
    /// Use an explicit directory as the resource root.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Locate the resource root: the `PHILU_EXTENSIONS_RESOURCES`
    /// environment variable when set, otherwise the bundled tree.
    pub fn discover() -> Self {
        let base = match std::env::var(RESOURCES_ENV_VAR) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(BUNDLED_RESOURCES),
        };
        if !base.is_dir() {
            warn!(base = %base.display(), "Resource root does not exist");
        }
        debug!(base = %base.display(), "Using resource root");
        Self { base }
    }

    /// The base directory itself.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The `templates` subtree registered as a template root.
    pub fn templates_root(&self) -> PathBuf {
        self.base.join("templates")
    }

    /// The `patches` subtree scanned for environment patches.
    pub fn patches_dir(&self) -> PathBuf {
        self.base.join("patches")
    }

    /// Join path segments under the root and require the result to exist.
    pub fn resolve(&self, segments: &[&str]) -> Result<PathBuf> {
        let mut path = self.base.clone();
        for segment in segments {
            path.push(segment);
        }
        if !path.exists() {
            return Err(ExtensionError::ResourceNotFound(segments.join("/")));
        }
        Ok(path)
    }

    /// Read the full text of a bundled file.
    pub fn read(&self, segments: &[&str]) -> Result<String> {
        let path = self.resolve(segments)?;
        let content = fs::read_to_string(&path)?;
        debug!(path = %path.display(), bytes = content.len(), "Read bundled resource");
        Ok(content)
    }

    /// List the plain files directly inside a bundled subdirectory, sorted
    /// by file name.
    ///
    /// Subdirectories and other non-file entries are skipped. Sorting makes
    /// consumption order deterministic regardless of how the filesystem
    /// enumerates the directory.
    pub fn list_files(&self, segments: &[&str]) -> Result<Vec<PathBuf>> {
        let dir = self.resolve(segments)?;
        let mut files = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            } else {
                debug!(path = %path.display(), "Skipping non-file entry");
            }
        }

        files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        Ok(files)
    }
}
