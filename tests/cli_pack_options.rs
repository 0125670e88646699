//! Pack flag and environment override behavior.

mod common;

use common::{standard_fixture, TestEnv};

#[test]
fn dry_run_writes_nothing() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run(&["pack", "--dry-run"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("dry run"));
    assert!(!env.path("dist").exists());
}

#[test]
fn format_flag_limits_outputs() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run(&["pack", "--format", "zip"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("dist/nixlper-1.1.0.zip").is_file());
    assert!(!env.path("dist/nixlper-1.1.0.tar").exists());
}

#[test]
fn duplicate_formats_pack_once() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run(&["pack", "--format", "tar,tar"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("1 archive(s)"));
}

#[test]
fn output_dir_flag_overrides_manifest() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run(&["pack", "--output-dir", "build/distributions"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("build/distributions/nixlper-1.1.0.zip").is_file());
    assert!(!env.path("dist").exists());
}

#[test]
fn formats_env_override_applies() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run_with_env(&["pack"], &[("DISTPACK_FORMATS", "tar-gz")]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("dist/nixlper-1.1.0.tar.gz").is_file());
    assert!(!env.path("dist/nixlper-1.1.0.zip").exists());
}

#[test]
fn checksums_env_override_disables_sidecars() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run_with_env(&["pack"], &[("DISTPACK_CHECKSUMS", "false")]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("dist/nixlper-1.1.0.zip").is_file());
    assert!(!env.path("dist/nixlper-1.1.0.zip.sha256").exists());
}

#[test]
fn manifest_without_help_dir_packs_two_entries() {
    let env = TestEnv::new();
    env.write("nixlper.sh", "#!/bin/bash\n");
    env.write("version.template", "${project.name} ${VERSION_SHA}\n");
    env.write(
        "distpack.toml",
        r#"
[package]
name = "nixlper"
version = "1.1.0"

[contents]
script = "nixlper.sh"
version-template = "version.template"
"#,
    );
    env.git_init_and_commit();

    let result = env.run(&["pack", "--format", "tar", "-v"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("+ nixlper.sh"));
    assert!(result.stdout.contains("+ version"));
    assert!(!result.stdout.contains("help/"));
}

#[test]
fn sha_and_time_overrides_allow_packing_without_git() {
    let env = TestEnv::new();
    standard_fixture(&env);
    // no git_init_and_commit

    let result = env.run_with_env(
        &["pack", "--format", "zip"],
        &[
            ("DISTPACK_SHA", "abc1234"),
            ("DISTPACK_TIME", "2024-05-10T12:00:00+02:00"),
        ],
    );
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("commit abc1234 (2024-05-10)"));
    assert!(env.path("dist/nixlper-1.1.0.zip").is_file());
}

#[test]
fn pack_outside_git_repo_fails_without_overrides() {
    let env = TestEnv::new();
    standard_fixture(&env);

    let result = env.run(&["pack"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("git metadata unavailable"),
        "unexpected stderr: {}",
        result.stderr
    );
    assert!(!env.path("dist").exists());
}

#[test]
fn missing_script_fails_with_role_and_path() {
    let env = TestEnv::new();
    standard_fixture(&env);
    std::fs::remove_file(env.path("src/main/bash/nixlper.sh")).unwrap();
    env.git_init_and_commit();

    let result = env.run(&["pack"]);
    assert!(!result.success);
    assert!(result.stderr.contains("script not found"));
    assert!(result.stderr.contains("nixlper.sh"));
}

#[test]
fn json_mode_emits_ndjson_events() {
    let env = TestEnv::new();
    standard_fixture(&env);
    env.git_init_and_commit();

    let result = env.run(&["pack", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("NDJSON line"))
        .collect();

    assert_eq!(events.first().unwrap()["event"], "staged");
    assert_eq!(events.first().unwrap()["entries"], 5);
    let archives: Vec<&serde_json::Value> = events
        .iter()
        .filter(|e| e["event"] == "archive")
        .collect();
    assert_eq!(archives.len(), 2);
    assert_eq!(archives[0]["format"], "zip");
    assert_eq!(archives[1]["format"], "tar");
    assert_eq!(events.last().unwrap()["event"], "done");
    assert_eq!(events.last().unwrap()["archives"], 2);
}
