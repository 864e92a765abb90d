// tests/cli_test.rs
use git2::Repository;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_release-tagger");

fn ci_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("CI_REPOSITORY_URL", "https://gitlab-ci-token:x@gitlab.invalid/group/app.git"),
        ("CI_PROJECT_ID", "99"),
        ("CI_PROJECT_URL", "https://gitlab.invalid/group/app"),
        ("CI_PROJECT_PATH", "group/app"),
        ("NPA_USERNAME", "bot"),
        ("NPA_PASSWORD", "token"),
    ]
}

// Helper: run the binary with a clean environment rooted in `home`
fn run(home: &Path, vars: &[(&str, &str)], args: &[&str]) -> Output {
    Command::new(BIN)
        .env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .envs(vars.iter().copied())
        .current_dir(home)
        .args(args)
        .output()
        .expect("Could not run release-tagger")
}

fn init_repo_with_commit(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    {
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = repo.signature().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();
    }
    repo
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &[], &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("release-tagger "));
}

#[test]
fn test_help_lists_flags() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &[], &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_missing_environment_variable_fails() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &[], &[]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CI_REPOSITORY_URL"));
}

#[test]
fn test_finalized_tag_exits_cleanly() {
    let home = TempDir::new().unwrap();
    let repo_dir = home.path().join("repo");
    let repo = init_repo_with_commit(&repo_dir);
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight("1.0.0", head.as_object(), false).unwrap();

    let output = run(
        home.path(),
        &ci_vars(),
        &["--repo", repo_dir.to_str().unwrap()],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skip already tagged commits"));
    assert!(repo.find_reference("refs/tags/1.0.1").is_err());
}

#[test]
fn test_dry_run_without_tags_plans_initial_version() {
    let home = TempDir::new().unwrap();
    let repo_dir = home.path().join("repo");
    let repo = init_repo_with_commit(&repo_dir);

    let output = run(
        home.path(),
        &ci_vars(),
        &["--repo", repo_dir.to_str().unwrap(), "--dry-run"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dry run"));
    assert!(stdout.contains("1.0.0"));
    assert!(repo.find_reference("refs/tags/1.0.0").is_err());
}

#[test]
fn test_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.toml");
    std::fs::write(&config, "[labels\n").unwrap();

    let output = run(
        home.path(),
        &ci_vars(),
        &["--config", config.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error loading config"));
}
