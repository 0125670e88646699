//! `pack` - stage the manifest contents and write the archives.

use std::path::PathBuf;

use anyhow::{Context, Result};

use distpack::{archive, config, stage, ArchiveFormat, CommitInfo};

use crate::ui;

pub struct PackOptions {
    pub manifest: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub formats: Option<Vec<ArchiveFormat>>,
    pub dry_run: bool,
    pub json: bool,
    pub verbose: u8,
}

pub fn run(opts: &PackOptions) -> Result<()> {
    let (manifest, warnings) = config::load_with_warnings(&opts.manifest)?;
    if !opts.json {
        ui::print_manifest_warnings(&opts.manifest, &warnings);
    }

    let mut manifest = config::with_env_overrides(manifest);
    if let Some(dir) = &opts.output_dir {
        manifest.archive.output_dir = dir.clone();
    }
    if let Some(formats) = &opts.formats {
        manifest.archive.formats = formats.clone();
    }

    let root = super::manifest_root(&opts.manifest);
    let commit = CommitInfo::resolve(&root)?;
    let plan = stage::stage(&root, &manifest, &commit)?;

    if opts.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "staged",
                "command": "pack",
                "name": manifest.package.name,
                "version": manifest.package.version,
                "sha": commit.sha,
                "date": commit.date(),
                "entries": plan.len(),
            })
        );
    } else {
        println!(
            "📦 Packing {} {}",
            manifest.package.name, manifest.package.version
        );
        println!("   commit {} ({})", commit.sha, commit.date());
        if opts.verbose > 0 {
            for entry in plan.entries() {
                println!("   + {} ({} bytes)", entry.name(), entry.len());
            }
        }
    }

    if opts.dry_run {
        if opts.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "done",
                    "command": "pack",
                    "dry_run": true,
                    "archives": 0,
                })
            );
        } else {
            println!("   dry run - {} entries staged, nothing written", plan.len());
        }
        return Ok(());
    }

    let formats = archive::dedup_formats(&manifest.archive.formats);
    let output_dir = root.join(&manifest.archive.output_dir);
    let stem = manifest.archive_stem();

    let mut written = 0usize;
    for format in formats {
        let artifact = archive::write_archive(&plan, format, &output_dir, &stem)
            .with_context(|| format!("writing {format} archive"))?;
        if manifest.archive.checksums {
            archive::write_checksum_sidecar(&artifact)?;
        }

        if opts.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "archive",
                    "command": "pack",
                    "format": artifact.format.to_string(),
                    "path": artifact.path.display().to_string(),
                    "size": artifact.size,
                    "sha256": artifact.sha256,
                })
            );
        } else {
            println!(" → {} ({} bytes)", artifact.path.display(), artifact.size);
        }
        written += 1;
    }

    if opts.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "done",
                "command": "pack",
                "dry_run": false,
                "archives": written,
            })
        );
    } else {
        println!(
            "✅ {} archive(s) written to {}",
            written,
            output_dir.display()
        );
    }

    Ok(())
}
