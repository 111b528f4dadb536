//! Build-phase installers for the `proxy` and `claude-code` features.
//!
//! Both run exactly once during image build, persist their state files and
//! exit. A rebuild replaces the files; nothing here runs at shell start.

use std::env;
use std::io;

use which::which;

use crate::color::{color_enabled_stderr, log_info_stderr, log_warn_stderr};
use crate::errors::InstallError;
use crate::paths;
use crate::proxy::{self, ProxySettings};
use crate::shellrc;
use crate::state;
use crate::util::exec::ExecRequest;

pub const CLAUDE_CODE_PACKAGE: &str = "@anthropic-ai/claude-code";

/// Model slots accepted by the `models` option spec.
const MODEL_SLOTS: &[&str] = &["haiku", "sonnet", "opus"];

#[derive(Debug, Clone, Default)]
pub struct ProxyInstallOpts {
    pub proxy: ProxySettings,
    pub apt_proxy: bool,
    pub enabled: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClaudeCodeOpts {
    pub version: String,
    pub provider: String,
    pub models: String,
    pub proxy: ProxySettings,
    pub enabled: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Test/pre-baked-image escape hatch: skip the npm step but keep configuring.
fn skip_install() -> bool {
    env::var("FEATUREKIT_SKIP_INSTALL").ok().as_deref() == Some("1")
}

/// Parse the `models` option spec "haiku:model,sonnet:model,opus:model".
/// An empty spec is valid and yields no pairs.
pub fn parse_models_spec(spec: &str) -> Result<Vec<(String, String)>, String> {
    let mut out: Vec<(String, String)> = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (slot, model) = part
            .split_once(':')
            .ok_or_else(|| format!("invalid models entry '{part}': expected slot:model"))?;
        let slot = slot.trim();
        let model = model.trim();
        if !MODEL_SLOTS.contains(&slot) {
            return Err(format!(
                "unknown model slot '{slot}': expected one of {}",
                MODEL_SLOTS.join(", ")
            ));
        }
        if model.is_empty() {
            return Err(format!("empty model for slot '{slot}'"));
        }
        if out.iter().any(|(s, _)| s == slot) {
            return Err(format!("duplicate model slot '{slot}'"));
        }
        out.push((slot.to_string(), model.to_string()));
    }
    Ok(out)
}

fn package_spec(version: &str) -> String {
    if version.is_empty() || version == "latest" {
        CLAUDE_CODE_PACKAGE.to_string()
    } else {
        format!("{CLAUDE_CODE_PACKAGE}@{version}")
    }
}

/// Build the npm request for the CLI package, with effective proxy settings
/// injected in both cases (npm honors the lowercase forms).
fn npm_request(version: &str, proxy: &ProxySettings) -> io::Result<ExecRequest> {
    let npm = which("npm").map_err(|_| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "featurekit: npm not found in PATH (required to install the Claude Code CLI)",
        )
    })?;
    let mut req = ExecRequest::new(npm.display().to_string())
        .arg("install")
        .arg("-g")
        .arg(package_spec(version));
    for (name, value) in proxy.pairs() {
        req = req
            .env(name, value)
            .env(name.to_ascii_lowercase(), value);
    }
    Ok(req)
}

/// `install proxy`: resolve effective settings from options and environment
/// and persist the state file. A pre-existing state file is never an input
/// here; a re-install replaces it outright.
pub fn run_install_proxy(opts: &ProxyInstallOpts) -> Result<(), InstallError> {
    let use_err = color_enabled_stderr();
    if !opts.enabled {
        log_info_stderr(use_err, "featurekit: proxy feature disabled; nothing to do.");
        return Ok(());
    }

    let (effective, source) = proxy::resolve_build(&opts.proxy);
    proxy::warn_on_invalid_urls(&effective);
    if opts.verbose {
        log_info_stderr(
            use_err,
            &format!("featurekit: proxy source: {}", source.as_str()),
        );
    }

    let state_path = paths::proxy_state_path()?;
    if opts.dry_run {
        log_info_stderr(
            use_err,
            &format!(
                "featurekit: dry-run: would write {} ({} values)",
                state_path.display(),
                effective.pairs().len()
            ),
        );
        return Ok(());
    }

    proxy::write_state(&state_path, &effective)?;
    if opts.apt_proxy {
        proxy::write_apt_conf(&effective)?;
    }
    if opts.verbose {
        log_info_stderr(
            use_err,
            &format!("featurekit: wrote {}", state_path.display()),
        );
    }
    Ok(())
}

/// `install claude-code`: install the CLI, persist provider/model state and
/// patch the shell rc.
pub fn run_install_claude_code(opts: &ClaudeCodeOpts) -> Result<(), InstallError> {
    let use_err = color_enabled_stderr();
    if !opts.enabled {
        log_info_stderr(
            use_err,
            "featurekit: claude-code feature disabled; nothing to do.",
        );
        return Ok(());
    }

    let models = parse_models_spec(&opts.models)
        .map_err(|msg| InstallError::Message(format!("featurekit: {msg}")))?;

    let (effective_proxy, source) = proxy::resolve(&opts.proxy)?;
    proxy::warn_on_invalid_urls(&effective_proxy);
    if opts.verbose {
        log_info_stderr(
            use_err,
            &format!("featurekit: proxy source: {}", source.as_str()),
        );
        let shown = if opts.provider.is_empty() {
            "(default)"
        } else {
            opts.provider.as_str()
        };
        log_info_stderr(use_err, &format!("featurekit: provider: {shown}"));
    }

    if opts.dry_run {
        // Preview without requiring npm to be present.
        let preview = ExecRequest::new("npm")
            .arg("install")
            .arg("-g")
            .arg(package_spec(&opts.version))
            .preview();
        log_info_stderr(use_err, &format!("featurekit: npm: {preview}"));
        log_info_stderr(use_err, "featurekit: dry-run requested; not executing.");
        return Ok(());
    }

    if skip_install() {
        log_warn_stderr(
            use_err,
            "featurekit: FEATUREKIT_SKIP_INSTALL=1; skipping npm install step.",
        );
    } else {
        let req = npm_request(&opts.version, &effective_proxy)?;
        if opts.verbose {
            log_info_stderr(use_err, &format!("featurekit: npm: {}", req.preview()));
        }
        let status = req
            .status()
            .map_err(|e| InstallError::Message(e.to_string()))?;
        if !status.success() {
            // Build must abort; there is no retry policy.
            return Err(InstallError::Message(format!(
                "featurekit: npm install failed with status {}",
                status.code().unwrap_or(1)
            )));
        }
    }

    // State files are fully replaced on rebuild, including emptiness.
    state::write_single_line(&paths::provider_state_path()?, &opts.provider)?;
    let model_pairs: Vec<(&str, &str)> = models
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    state::write_kv_file(&paths::models_state_path()?, &model_pairs)?;

    for rc in paths::shell_rc_paths()? {
        let patched = shellrc::patch_rc_file(&rc)?;
        if opts.verbose {
            let verb = if patched { "patched" } else { "already patched" };
            log_info_stderr(use_err, &format!("featurekit: {verb} {}", rc.display()));
        }
    }
    Ok(())
}
