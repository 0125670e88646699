//! Pack planning - stage archive entries without writing
//!
//! Stage 1: `stage()` reads and transforms every input into a `PackPlan`.
//! Stage 2: the archive writers emit the plan. Staging never touches the
//! output directory, so a dry run is just a plan that is never executed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Manifest;
use crate::entry::{ArchiveEntry, DIST_MODE};
use crate::error::{DistpackError, DistpackResult};
use crate::git::CommitInfo;
use crate::normalize::to_unix_eol;
use crate::template::{render, Stamp};

/// Archive member name of the rendered version file
pub const VERSION_ENTRY: &str = "version";
/// Archive directory holding the help files
pub const HELP_DIR_ENTRY: &str = "help";

/// Result of planning a pack operation
#[derive(Debug, Clone)]
pub struct PackPlan {
    entries: Vec<ArchiveEntry>,
    stamp: Stamp,
    mtime: u64,
}

impl PackPlan {
    /// Assemble a plan from already-staged entries
    pub fn new(entries: Vec<ArchiveEntry>, stamp: Stamp, mtime: u64) -> Self {
        Self {
            entries,
            stamp,
            mtime,
        }
    }

    /// Entries in archive order: script, version, then sorted help paths
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Values stamped into the version entry
    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    /// Entry mtime for formats that store one (seconds since epoch)
    pub fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Total number of staged entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stage all manifest contents into a `PackPlan`.
///
/// Reads the script, renders the version template, and walks the help
/// directory. Every entry comes out LF-normalized with mode 755.
pub fn stage(root: &Path, manifest: &Manifest, commit: &CommitInfo) -> DistpackResult<PackPlan> {
    let stamp = Stamp::for_package(&manifest.package, commit);
    let mut entries = Vec::new();

    entries.push(stage_script(root, &manifest.contents.script)?);
    entries.push(stage_version(
        root,
        &manifest.contents.version_template,
        &stamp,
    )?);

    if let Some(help_dir) = &manifest.contents.help_dir {
        entries.extend(stage_help(root, help_dir)?);
    }

    Ok(PackPlan::new(entries, stamp, commit.epoch_secs()))
}

/// Render the version entry content without staging anything else.
///
/// Used by `stamp` to preview exactly what `pack` would put in the archive.
pub fn render_version(root: &Path, manifest: &Manifest, commit: &CommitInfo) -> DistpackResult<String> {
    let stamp = Stamp::for_package(&manifest.package, commit);
    let template = read_template(root, &manifest.contents.version_template)?;
    Ok(crate::normalize::to_unix_eol_str(&render(&template, &stamp)))
}

fn stage_script(root: &Path, script: &Path) -> DistpackResult<ArchiveEntry> {
    let path = root.join(script);
    if !path.is_file() {
        return Err(DistpackError::MissingInput {
            role: "script",
            path,
        });
    }
    let name = path
        .file_name()
        .map(PathBuf::from)
        .ok_or(DistpackError::MissingInput {
            role: "script",
            path: path.clone(),
        })?;

    let content = to_unix_eol(&fs::read(&path)?);
    Ok(ArchiveEntry::new(name, content, DIST_MODE))
}

fn stage_version(root: &Path, template_path: &Path, stamp: &Stamp) -> DistpackResult<ArchiveEntry> {
    let template = read_template(root, template_path)?;
    let content = to_unix_eol(render(&template, stamp).as_bytes());
    Ok(ArchiveEntry::new(VERSION_ENTRY, content, DIST_MODE))
}

fn read_template(root: &Path, template_path: &Path) -> DistpackResult<String> {
    let path = root.join(template_path);
    if !path.is_file() {
        return Err(DistpackError::MissingInput {
            role: "version template",
            path,
        });
    }
    let bytes = fs::read(&path)?;
    String::from_utf8(bytes).map_err(|_| DistpackError::NonUtf8Template { path })
}

/// Walk the help directory and stage every file under `help/`.
///
/// Standard ignore filters are disabled: the help directory is copied
/// verbatim, hidden files included. Traversal order is sorted so archives
/// are deterministic.
fn stage_help(root: &Path, help_dir: &Path) -> DistpackResult<Vec<ArchiveEntry>> {
    let dir = root.join(help_dir);
    if !dir.is_dir() {
        return Err(DistpackError::MissingInput {
            role: "help directory",
            path: dir,
        });
    }

    let mut entries = Vec::new();
    let walker = ignore::WalkBuilder::new(&dir)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for result in walker {
        let dirent = result.map_err(|e| std::io::Error::other(e.to_string()))?;
        if !dirent.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let rel = dirent
            .path()
            .strip_prefix(&dir)
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        let content = to_unix_eol(&fs::read(dirent.path())?);
        entries.push(ArchiveEntry::new(
            Path::new(HELP_DIR_ENTRY).join(rel),
            content,
            DIST_MODE,
        ));
    }

    Ok(entries)
}
