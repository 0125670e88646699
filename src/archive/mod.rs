//! Archive writers
//!
//! One writer per format. Archives are first written to a tempfile inside
//! the destination directory and persisted into place, so a failed pack
//! never leaves a truncated archive behind.

mod tar;
mod zip;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DistpackResult;
use crate::stage::PackPlan;

/// Archive container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// Zip container (deflate)
    Zip,
    /// Uncompressed tar
    Tar,
    /// Gzip-compressed tar
    TarGz,
}

impl ArchiveFormat {
    /// All supported formats
    pub const ALL: [ArchiveFormat; 3] = [
        ArchiveFormat::Zip,
        ArchiveFormat::Tar,
        ArchiveFormat::TarGz,
    ];

    /// File extension, without leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar-gz",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar" => Ok(ArchiveFormat::Tar),
            "tar-gz" | "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            other => Err(format!(
                "unknown archive format '{other}' (expected zip, tar or tar-gz)"
            )),
        }
    }
}

/// A written archive with its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Final archive location
    pub path: PathBuf,
    pub format: ArchiveFormat,
    /// Archive size in bytes
    pub size: u64,
    /// Hex SHA-256 of the archive file
    pub sha256: String,
}

impl Artifact {
    /// File name portion of the archive path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Drop duplicate formats, keeping first occurrence order
pub fn dedup_formats(formats: &[ArchiveFormat]) -> Vec<ArchiveFormat> {
    let mut out = Vec::new();
    for format in formats {
        if !out.contains(format) {
            out.push(*format);
        }
    }
    out
}

/// Write one archive for `plan` into `dest_dir` as `<stem>.<ext>`
pub fn write_archive(
    plan: &PackPlan,
    format: ArchiveFormat,
    dest_dir: &Path,
    stem: &str,
) -> DistpackResult<Artifact> {
    fs::create_dir_all(dest_dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dest_dir)?;
    match format {
        ArchiveFormat::Zip => zip::write(plan, temp.as_file_mut())?,
        ArchiveFormat::Tar => {
            let file = tar::write(plan, temp.as_file_mut())?;
            file.flush()?;
        }
        ArchiveFormat::TarGz => {
            let encoder = flate2::write::GzEncoder::new(
                temp.as_file_mut(),
                flate2::Compression::default(),
            );
            let encoder = tar::write(plan, encoder)?;
            encoder.finish()?.flush()?;
        }
    }

    let sha256 = hash_file(temp.path())?;
    let size = temp.as_file().metadata()?.len();

    let dest = dest_dir.join(format!("{stem}.{}", format.extension()));
    temp.persist(&dest).map_err(|e| e.error)?;

    Ok(Artifact {
        path: dest,
        format,
        size,
        sha256,
    })
}

/// Write the `<archive>.sha256` sidecar in `sha256sum` format
pub fn write_checksum_sidecar(artifact: &Artifact) -> DistpackResult<PathBuf> {
    let sidecar = sidecar_path(&artifact.path);
    let line = format!("{}  {}\n", artifact.sha256, artifact.file_name());
    fs::write(&sidecar, line)?;
    Ok(sidecar)
}

fn sidecar_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".sha256");
    PathBuf::from(name)
}

fn hash_file(path: &Path) -> DistpackResult<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
