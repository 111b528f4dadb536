mod common;

use common::{run, stderr, write_provider, write_provider_state};

#[test]
fn test_doctor_runs_clean_on_fresh_home() {
    let td = tempfile::tempdir().expect("tmpdir");
    let out = run(td.path(), &["doctor"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("featurekit doctor"));
    assert!(err.contains("doctor: completed diagnostics."));
    assert!(err.contains("provider: (default)"));
}

#[test]
fn test_doctor_warns_when_configured_provider_has_no_auth() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    write_provider_state(home, "ghost");

    let out = run(home, &["doctor"]);
    assert!(out.status.success(), "doctor reports, it does not fail");
    let err = stderr(&out);
    assert!(
        err.contains("provider 'ghost' is configured") && err.contains("no auth file"),
        "stderr: {err}"
    );
}

#[test]
fn test_doctor_masks_the_auth_token() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    write_provider(home, "corp", Some("sk-corp-secret-token\n"), None);
    write_provider_state(home, "corp");

    let out = run(home, &["doctor"]);
    assert!(out.status.success());
    let err = stderr(&out);
    assert!(err.contains("sk-c****"), "stderr: {err}");
    assert!(!err.contains("sk-corp-secret-token"), "stderr: {err}");
}

#[test]
fn test_doctor_lists_available_providers() {
    let td = tempfile::tempdir().expect("tmpdir");
    let home = td.path();
    write_provider(home, "z.ai", Some("tok123\n"), None);
    write_provider(home, "corp", Some("tok456\n"), None);

    let out = run(home, &["doctor"]);
    assert!(out.status.success());
    assert!(
        stderr(&out).contains("providers available: corp, z.ai"),
        "stderr: {}",
        stderr(&out)
    );
}
