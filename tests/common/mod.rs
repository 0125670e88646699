//! Test environment builder for isolated distpack testing.
//!
//! Provides `TestEnv` - a temp project directory plus helpers to lay down
//! fixture files, create git history, and run the distpack binary.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a distpack CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with a temp project directory.
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_distpack")),
        }
    }

    /// Get path relative to project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file relative to project root, creating parent directories
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Turn the project root into a git repository with one commit
    pub fn git_init_and_commit(&self) {
        self.git(&["init"]);
        self.git(&["config", "user.name", "test-user"]);
        self.git(&["config", "user.email", "test@example.com"]);
        self.git(&["add", "-A"]);
        self.git(&["commit", "--allow-empty", "-m", "initial"]);
    }

    /// Abbreviated SHA of HEAD, as distpack captures it
    pub fn head_short_sha(&self) -> String {
        self.git_stdout(&["log", "-1", "--pretty=format:%h"])
    }

    /// Commit date of HEAD (`YYYY-MM-DD`)
    pub fn head_commit_date(&self) -> String {
        let iso = self.git_stdout(&["log", "-1", "--pretty=format:%cI"]);
        iso.chars().take(10).collect()
    }

    /// Run distpack in the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run distpack in the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path()).args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute distpack");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.project_root.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn git_stdout(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.project_root.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest used by most fixtures
pub const MANIFEST: &str = r#"
[package]
name = "nixlper"
version = "1.1.0"

[contents]
script = "src/main/bash/nixlper.sh"
version-template = "src/main/template/version.template"
help-dir = "src/main/help"
"#;

/// Template exercising all four tokens plus one that must pass through
pub const TEMPLATE: &str = "name=${project.name}\r\nversion=${project.version}\r\nsha=${VERSION_SHA}\r\ntime=${VERSION_TIME}\r\nraw=${not.a.token}\r\n";

/// Lay down the standard nixlper-style fixture project
pub fn standard_fixture(env: &TestEnv) {
    env.write(
        "src/main/bash/nixlper.sh",
        "#!/bin/bash\r\necho \"nixlper\"\r\n",
    );
    env.write("src/main/template/version.template", TEMPLATE);
    env.write("src/main/help/usage.txt", "usage\r\n");
    env.write("src/main/help/topics/bookmarks.txt", "bookmarks\n");
    env.write("src/main/help/.hidden.txt", "hidden\r\n");
    env.write("distpack.toml", MANIFEST);
}

/// The version file `standard_fixture` renders for a given sha and date
pub fn expected_version(sha: &str, date: &str) -> String {
    format!("name=nixlper\nversion=1.1.0\nsha={sha}\ntime={date}\nraw=${{not.a.token}}\n")
}

/// Hex SHA-256 of a file, `sha256sum` style
pub fn sha256_hex(path: &Path) -> String {
    use sha2::{Digest, Sha256};
    let bytes = fs::read(path).unwrap();
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    format!("{:x}", hasher.finalize())
}
