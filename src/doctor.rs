//! Diagnostics: effective configuration, state files, provider layout.
//!
//! Missing provider credentials are silent at shell start; doctor is the one
//! place that misconfiguration gets reported loudly.

use std::fs;
use std::path::Path;

use which::which;

use crate::color::{color_enabled_stderr, log_warn_stderr, paint};
use crate::paths;
use crate::provider;
use crate::proxy::{self, ProxySettings};
use crate::state;

/// Mask a credential for display: first four characters, then a fixed tail.
fn mask_token(tok: &str) -> String {
    let head: String = tok.chars().take(4).collect();
    if tok.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{head}****")
    }
}

fn file_status(path: &Path) -> String {
    if path.is_file() {
        "present".to_string()
    } else {
        "absent".to_string()
    }
}

pub fn run_doctor(verbose: bool) -> std::io::Result<()> {
    let use_err = color_enabled_stderr();
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("featurekit doctor");
    eprintln!();
    eprintln!("  version: v{version}");
    eprintln!(
        "  host:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    if verbose {
        eprintln!("  build:   {} ({} {})",
            env!("FEATUREKIT_BUILD_DATE"),
            env!("FEATUREKIT_BUILD_TARGET"),
            env!("FEATUREKIT_BUILD_PROFILE"),
        );
        eprintln!("  rustc:   {}", env!("FEATUREKIT_BUILD_RUSTC"));
    }
    eprintln!();

    // Installer tooling
    match which("npm") {
        Ok(p) => eprintln!("  npm: {}", p.display()),
        Err(_) => eprintln!("  npm: not found"),
    }
    eprintln!();

    // Proxy: state file and effective values with their source tier
    let proxy_state = paths::proxy_state_path()?;
    eprintln!(
        "  proxy state file: {} ({})",
        proxy_state.display(),
        file_status(&proxy_state)
    );
    let (effective, source) = proxy::resolve(&ProxySettings::default())?;
    eprintln!("  proxy source: {}", source.as_str());
    for (name, value) in effective.pairs() {
        eprintln!("  {name}: {value}");
    }
    if verbose {
        let set = proxy::proxy_env_vars_set();
        if set.is_empty() {
            eprintln!("  proxy env vars set: (none)");
        } else {
            eprintln!("  proxy env vars set: {}", set.join(", "));
        }
    }
    eprintln!();

    // Provider: persisted identifier and credential layout
    let provider_state = paths::provider_state_path()?;
    let provider_id = provider::current_provider_id()?;
    eprintln!(
        "  provider state file: {} ({})",
        provider_state.display(),
        file_status(&provider_state)
    );
    let shown = provider_id.as_deref().unwrap_or("(default)");
    let shown_val = paint(use_err, "\x1b[34;1m", shown);
    eprintln!("  provider: {shown_val}");

    let providers_root = paths::providers_root()?;
    if let Ok(entries) = fs::read_dir(&providers_root) {
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        if names.is_empty() {
            eprintln!("  providers available: (none)");
        } else {
            eprintln!("  providers available: {}", names.join(", "));
        }
    } else {
        eprintln!("  providers available: (no providers directory)");
    }

    let creds = provider::resolve_current()?;
    match creds.token.as_deref() {
        Some(tok) => eprintln!("  auth token: {}", mask_token(tok)),
        None => eprintln!("  auth token: (unset)"),
    }
    eprintln!(
        "  base url: {}",
        creds.base_url.as_deref().unwrap_or("(default endpoint)")
    );

    // A configured provider without an auth file resolves silently to nothing
    // at shell start; warn here so operators can see it.
    if let Some(id) = provider_id.as_deref() {
        if provider::provider_auth_missing(&providers_root, id) {
            let dir = provider::provider_dir(&providers_root, id);
            log_warn_stderr(
                use_err,
                &format!(
                    "featurekit: warning: provider '{id}' is configured but {} has no auth file",
                    dir.display()
                ),
            );
        }
    }

    // Models mapping persisted at build time
    let models_state = paths::models_state_path()?;
    if models_state.is_file() {
        let pairs = state::read_kv_file(&models_state)?;
        if pairs.is_empty() {
            eprintln!("  models: (none)");
        } else {
            let joined: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
            eprintln!("  models: {}", joined.join(", "));
        }
    } else {
        eprintln!("  models: (none)");
    }

    eprintln!();
    eprintln!("doctor: completed diagnostics.");
    Ok(())
}
