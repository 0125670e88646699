//! Command implementations for the distpack CLI.

pub mod check;
pub mod pack;
pub mod stamp;

use std::path::{Path, PathBuf};

/// Directory the manifest lives in; every manifest path resolves against it.
pub(crate) fn manifest_root(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
