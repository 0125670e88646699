//! Manifest loading and validation
//!
//! The manifest (`distpack.toml` by default) describes what goes into the
//! distribution: the package identity, the files to stage, and how to
//! archive them. Unknown keys are surfaced as non-fatal warnings instead of
//! hard errors so a manifest written for a newer distpack still packs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::ArchiveFormat;
use crate::error::{DistpackError, DistpackResult};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "distpack.toml";

/// Top-level manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageConfig,
    pub contents: ContentsConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// `[package]` section - identity stamped into the version file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    pub version: String,
}

/// `[contents]` section - files that go into the archive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentsConfig {
    /// Shell script placed at the archive root, relative to the manifest
    pub script: PathBuf,

    /// Template rendered into the `version` entry
    pub version_template: PathBuf,

    /// Directory copied under `help/` in the archive
    #[serde(default)]
    pub help_dir: Option<PathBuf>,
}

/// `[archive]` section - output formats and location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArchiveConfig {
    #[serde(default = "default_formats")]
    pub formats: Vec<ArchiveFormat>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write a `.sha256` sidecar next to each archive
    #[serde(default = "default_checksums")]
    pub checksums: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            output_dir: default_output_dir(),
            checksums: default_checksums(),
        }
    }
}

fn default_formats() -> Vec<ArchiveFormat> {
    vec![ArchiveFormat::Zip, ArchiveFormat::Tar]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_checksums() -> bool {
    true
}

impl Manifest {
    /// Load a manifest, discarding warnings
    pub fn load(path: &Path) -> DistpackResult<Self> {
        load_with_warnings(path).map(|(manifest, _)| manifest)
    }

    /// Archive file stem, `<name>-<version>`
    pub fn archive_stem(&self) -> String {
        format!("{}-{}", self.package.name, self.package.version)
    }
}

/// Non-fatal manifest warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load a manifest and collect non-fatal warnings (e.g. unknown keys)
pub fn load_with_warnings(path: &Path) -> DistpackResult<(Manifest, Vec<ManifestWarning>)> {
    if !path.exists() {
        return Err(DistpackError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let manifest: Manifest = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DistpackError::InvalidManifest {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ManifestWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((manifest, warnings))
}

/// Apply environment variable overrides (`DISTPACK_*` prefix)
pub fn with_env_overrides(manifest: Manifest) -> Manifest {
    apply_overrides(
        manifest,
        std::env::var("DISTPACK_OUTPUT_DIR").ok(),
        std::env::var("DISTPACK_FORMATS").ok(),
        std::env::var("DISTPACK_CHECKSUMS").ok(),
    )
}

fn apply_overrides(
    mut manifest: Manifest,
    output_dir: Option<String>,
    formats: Option<String>,
    checksums: Option<String>,
) -> Manifest {
    if let Some(dir) = output_dir {
        if !dir.is_empty() {
            manifest.archive.output_dir = PathBuf::from(dir);
        }
    }

    // comma-separated format names; unparseable entries are skipped
    if let Some(formats) = formats {
        let parsed: Vec<ArchiveFormat> = formats
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if !parsed.is_empty() {
            manifest.archive.formats = parsed;
        }
    }

    if let Some(val) = checksums {
        manifest.archive.checksums = val.to_lowercase() != "false" && val != "0";
    }

    manifest
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "package",
        "name",
        "version",
        "contents",
        "script",
        "version-template",
        "help-dir",
        "archive",
        "formats",
        "output-dir",
        "checksums",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
