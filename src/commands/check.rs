//! `check` - validate the manifest and everything it references.
//!
//! Exits non-zero when any input is missing, so CI can gate releases on it.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use distpack::{config, git, CommitInfo};

use crate::ui;

pub struct CheckOptions {
    pub manifest: PathBuf,
    pub json: bool,
}

struct CheckItem {
    label: String,
    ok: bool,
    detail: Option<String>,
}

impl CheckItem {
    fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: true,
            detail: None,
        }
    }

    fn fail(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: false,
            detail: Some(detail.into()),
        }
    }
}

pub fn run(opts: &CheckOptions) -> Result<()> {
    let (manifest, warnings) = config::load_with_warnings(&opts.manifest)?;
    if !opts.json {
        ui::print_manifest_warnings(&opts.manifest, &warnings);
    }
    let manifest = config::with_env_overrides(manifest);
    let root = super::manifest_root(&opts.manifest);

    let mut items = Vec::new();

    let script = root.join(&manifest.contents.script);
    if script.is_file() {
        items.push(CheckItem::pass(format!("script {}", script.display())));
    } else {
        items.push(CheckItem::fail("script", format!("not found: {}", script.display())));
    }

    let template = root.join(&manifest.contents.version_template);
    if !template.is_file() {
        items.push(CheckItem::fail(
            "version template",
            format!("not found: {}", template.display()),
        ));
    } else if !matches!(fs::read(&template), Ok(bytes) if String::from_utf8(bytes.clone()).is_ok()) {
        items.push(CheckItem::fail(
            "version template",
            format!("not valid UTF-8: {}", template.display()),
        ));
    } else {
        items.push(CheckItem::pass(format!(
            "version template {}",
            template.display()
        )));
    }

    match &manifest.contents.help_dir {
        Some(help_dir) => {
            let dir = root.join(help_dir);
            if dir.is_dir() {
                items.push(CheckItem::pass(format!("help directory {}", dir.display())));
            } else {
                items.push(CheckItem::fail(
                    "help directory",
                    format!("not found: {}", dir.display()),
                ));
            }
        }
        None => items.push(CheckItem::pass("help directory (not configured)")),
    }

    match CommitInfo::resolve(&root) {
        Ok(commit) => items.push(CheckItem::pass(format!(
            "commit metadata {} ({})",
            commit.sha,
            commit.date()
        ))),
        Err(e) if git::is_git_repo(&root) => {
            items.push(CheckItem::fail("commit metadata", e.to_string()))
        }
        Err(_) => items.push(CheckItem::fail(
            "commit metadata",
            format!(
                "not a git repository; set {} and {} to pack anyway",
                git::SHA_OVERRIDE_VAR,
                git::TIME_OVERRIDE_VAR
            ),
        )),
    }

    let problems = items.iter().filter(|i| !i.ok).count();

    if opts.json {
        for item in &items {
            println!(
                "{}",
                serde_json::json!({
                    "event": "check_item",
                    "command": "check",
                    "label": item.label,
                    "ok": item.ok,
                    "detail": item.detail,
                })
            );
        }
        println!(
            "{}",
            serde_json::json!({
                "event": "done",
                "command": "check",
                "problems": problems,
            })
        );
    } else {
        for item in &items {
            match &item.detail {
                Some(detail) if !item.ok => println!("✗ {}: {}", item.label, detail),
                _ => println!("✓ {}", item.label),
            }
        }
    }

    if problems > 0 {
        bail!("check failed: {problems} problem(s)");
    }

    if !opts.json {
        println!("✅ manifest is ready to pack");
    }
    Ok(())
}
