//! ArchiveEntry entity - a staged file ready to be archived
//!
//! Entries are the result of staging manifest contents: line endings are
//! already normalized and mode bits decided. They represent exactly what
//! the archive writers will emit.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Permission bits for every distributed entry
pub const DIST_MODE: u32 = 0o755;

/// A staged file ready to be written into an archive
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    /// Path inside the archive (relative, `/`-separated)
    path: PathBuf,
    /// Normalized content
    content: Vec<u8>,
    /// Unix permission bits
    mode: u32,
    /// Cached content hash
    hash: Option<String>,
}

impl ArchiveEntry {
    /// Create a new entry
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>, mode: u32) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode,
            hash: None,
        }
    }

    /// Get the archive-relative path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Archive member name with `/` separators
    pub fn name(&self) -> String {
        let parts: Vec<String> = self
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        parts.join("/")
    }

    /// Get the content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Get the unix permission bits
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Compute and cache the content hash (SHA256)
    pub fn hash(&mut self) -> &str {
        if self.hash.is_none() {
            self.hash = Some(self.compute_hash());
        }
        self.hash.as_ref().unwrap()
    }

    /// Get hash if already computed
    pub fn cached_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.content);
        format!("sha256:{:x}", hasher.finalize())
    }
}
