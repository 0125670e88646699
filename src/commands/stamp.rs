//! `stamp` - render the version file exactly as `pack` would stage it.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use distpack::{config, stage, CommitInfo};

use crate::ui;

pub struct StampOptions {
    pub manifest: PathBuf,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn run(opts: &StampOptions) -> Result<()> {
    let (manifest, warnings) = config::load_with_warnings(&opts.manifest)?;
    if !opts.json {
        ui::print_manifest_warnings(&opts.manifest, &warnings);
    }
    let manifest = config::with_env_overrides(manifest);

    let root = super::manifest_root(&opts.manifest);
    let commit = CommitInfo::resolve(&root)?;
    let rendered = stage::render_version(&root, &manifest, &commit)?;

    match &opts.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            if opts.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "stamped",
                        "command": "stamp",
                        "path": path.display().to_string(),
                        "sha": commit.sha,
                        "date": commit.date(),
                    })
                );
            } else {
                println!("✅ wrote {}", path.display());
            }
        }
        None => {
            if opts.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "stamped",
                        "command": "stamp",
                        "content": rendered,
                        "sha": commit.sha,
                        "date": commit.date(),
                    })
                );
            } else {
                print!("{rendered}");
            }
        }
    }

    Ok(())
}
