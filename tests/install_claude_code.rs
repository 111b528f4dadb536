mod common;

use std::fs;

use common::{cmd, state_dir, stderr};

fn configure(home: &std::path::Path, extra: &[&str]) -> std::process::Output {
    let mut args = vec!["install", "claude-code"];
    args.extend_from_slice(extra);
    cmd(home, &args)
        .env("FEATUREKIT_SKIP_INSTALL", "1")
        .output()
        .expect("run install claude-code")
}

#[test]
fn test_configure_persists_provider_and_models() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();

    let out = configure(
        home,
        &[
            "--provider",
            "z.ai",
            "--models",
            "haiku:claude-3-5-haiku-20241022,sonnet:claude-sonnet-4",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let provider = fs::read_to_string(state_dir(home).join("provider")).unwrap();
    assert_eq!(provider, "z.ai\n");
    let models = fs::read_to_string(state_dir(home).join("models")).unwrap();
    assert_eq!(
        models,
        "haiku=claude-3-5-haiku-20241022\nsonnet=claude-sonnet-4\n"
    );
}

#[test]
fn test_configure_patches_bashrc_idempotently() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    fs::write(home.join(".bashrc"), "alias ll='ls -l'\n").unwrap();

    let out = configure(home, &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let first = fs::read_to_string(home.join(".bashrc")).unwrap();
    assert!(first.starts_with("alias ll='ls -l'\n"));
    assert!(first.contains("eval \"$(featurekit env)\""));

    let out = configure(home, &[]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(home.join(".bashrc")).unwrap(), first);
}

#[test]
fn test_configure_patches_zshrc_only_when_present() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    fs::write(home.join(".zshrc"), "").unwrap();

    let out = configure(home, &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(fs::read_to_string(home.join(".zshrc"))
        .unwrap()
        .contains("featurekit env"));
}

#[test]
fn test_rebuild_replaces_provider_state_with_empty() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();

    assert!(configure(home, &["--provider", "z.ai"]).status.success());
    assert!(configure(home, &[]).status.success());
    let provider = fs::read_to_string(state_dir(home).join("provider")).unwrap();
    assert_eq!(provider, "\n");
}

#[test]
fn test_dry_run_prints_preview_and_writes_nothing() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();

    let out = cmd(
        home,
        &[
            "--dry-run",
            "install",
            "claude-code",
            "--version",
            "1.0.24",
            "--provider",
            "z.ai",
        ],
    )
    .output()
    .expect("run dry-run install");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(
        err.contains("npm install -g @anthropic-ai/claude-code@1.0.24"),
        "stderr: {err}"
    );
    assert!(!state_dir(home).join("provider").exists());
    assert!(!home.join(".bashrc").exists());
}

#[test]
fn test_disabled_feature_is_a_noop() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();

    let out = configure(home, &["--provider", "z.ai", "--enabled", "false"]);
    assert!(out.status.success());
    assert!(!state_dir(home).join("provider").exists());
}

#[test]
fn test_missing_npm_exits_127() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    let empty_path = home.join("bin");
    fs::create_dir_all(&empty_path).unwrap();

    let out = cmd(home, &["install", "claude-code"])
        .env("PATH", &empty_path)
        .output()
        .expect("run install claude-code");
    assert_eq!(out.status.code(), Some(127));
    assert!(stderr(&out).contains("npm not found"), "stderr: {}", stderr(&out));
    assert!(!state_dir(home).join("provider").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_npm_aborts_the_build() {
    use std::os::unix::fs::PermissionsExt;

    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let npm = bin.join("npm");
    fs::write(&npm, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&npm, fs::Permissions::from_mode(0o755)).unwrap();

    let out = cmd(home, &["install", "claude-code", "--provider", "z.ai"])
        .env("PATH", &bin)
        .output()
        .expect("run install claude-code");
    assert_eq!(out.status.code(), Some(1));
    assert!(
        stderr(&out).contains("npm install failed"),
        "stderr: {}",
        stderr(&out)
    );
    // The build aborted before any state was persisted.
    assert!(!state_dir(home).join("provider").exists());
}

#[test]
fn test_invalid_models_spec_aborts_before_any_work() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();

    let out = configure(home, &["--models", "turbo:gpt-4"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown model slot"));
    assert!(!state_dir(home).join("provider").exists());
}
