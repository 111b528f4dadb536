//! Proxy settings resolution: state file > explicit options > environment.
//!
//! The state file is written once at image build and wins outright when
//! present, even for keys it omits (an omitted key means "unset"). Below
//! that tier each variable falls back independently from explicit options
//! to the process environment; values are never merged within a variable.
//!
//! The build phase resolves from options and environment only: the state
//! file is its output, never an input, so a feature re-install always takes
//! effect.

use std::io;
use std::path::Path;

use url::Url;

use crate::paths;
use crate::state;
use crate::util::ShellFile;

/// Proxy environment variable names we track.
pub(crate) const PROXY_ENV_VARS: &[&str] = &[
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "NO_PROXY",
    "http_proxy",
    "https_proxy",
    "no_proxy",
];

/// Return proxy env var names that are currently set and non-empty.
pub fn proxy_env_vars_set() -> Vec<String> {
    PROXY_ENV_VARS
        .iter()
        .filter_map(|k| {
            std::env::var(k)
                .ok()
                .filter(|v| !v.is_empty())
                .map(|_| k.to_string())
        })
        .collect()
}

/// Default bypass list for the `no_proxy` feature option.
pub const DEFAULT_NO_PROXY: &str = "localhost,127.0.0.1,.local";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub no: Option<String>,
}

impl ProxySettings {
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.no.is_none()
    }

    /// (NAME, value) pairs for the variables that resolved, in stable order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = self.http.as_deref() {
            out.push(("HTTP_PROXY", v));
        }
        if let Some(v) = self.https.as_deref() {
            out.push(("HTTPS_PROXY", v));
        }
        if let Some(v) = self.no.as_deref() {
            out.push(("NO_PROXY", v));
        }
        out
    }
}

/// Which tier produced the effective settings (reported by doctor). `Mixed`
/// means some variables came from options and some from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxySource {
    StateFile,
    Options,
    Environment,
    Mixed,
    Unset,
}

impl ProxySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxySource::StateFile => "state-file",
            ProxySource::Options => "options",
            ProxySource::Environment => "environment",
            ProxySource::Mixed => "options+environment",
            ProxySource::Unset => "unset",
        }
    }
}

/// Environment lookup honoring both cases, uppercase preferred.
fn env_proxy_var(upper: &str, lower: &str, env: &dyn Fn(&str) -> Option<String>) -> Option<String> {
    env(upper)
        .filter(|v| !v.is_empty())
        .or_else(|| env(lower).filter(|v| !v.is_empty()))
}

fn settings_from_env(env: &dyn Fn(&str) -> Option<String>) -> ProxySettings {
    ProxySettings {
        http: env_proxy_var("HTTP_PROXY", "http_proxy", env),
        https: env_proxy_var("HTTPS_PROXY", "https_proxy", env),
        no: env_proxy_var("NO_PROXY", "no_proxy", env),
    }
}

fn settings_from_state_file(path: &Path) -> Option<ProxySettings> {
    let pairs = state::read_kv_file(path).ok()?;
    let find = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    };
    Some(ProxySettings {
        http: find("HTTP_PROXY"),
        https: find("HTTPS_PROXY"),
        no: find("NO_PROXY"),
    })
}

fn pick(
    opt: &Option<String>,
    env_value: Option<String>,
    used_options: &mut bool,
    used_env: &mut bool,
) -> Option<String> {
    if opt.is_some() {
        *used_options = true;
        opt.clone()
    } else if env_value.is_some() {
        *used_env = true;
        env_value
    } else {
        None
    }
}

/// Per-variable fallback from explicit options to the environment, tracking
/// which tiers actually contributed.
fn resolve_options_env(
    options: &ProxySettings,
    env: &dyn Fn(&str) -> Option<String>,
) -> (ProxySettings, ProxySource) {
    let from_env = settings_from_env(env);
    let mut used_options = false;
    let mut used_env = false;
    let merged = ProxySettings {
        http: pick(&options.http, from_env.http, &mut used_options, &mut used_env),
        https: pick(&options.https, from_env.https, &mut used_options, &mut used_env),
        no: pick(&options.no, from_env.no, &mut used_options, &mut used_env),
    };
    let source = match (used_options, used_env) {
        (true, true) => ProxySource::Mixed,
        (true, false) => ProxySource::Options,
        (false, true) => ProxySource::Environment,
        (false, false) => ProxySource::Unset,
    };
    (merged, source)
}

/// Pure three-tier resolution; `env` is injected for testability.
pub fn resolve_from(
    state_file: &Path,
    options: &ProxySettings,
    env: &dyn Fn(&str) -> Option<String>,
) -> (ProxySettings, ProxySource) {
    if let Some(settings) = settings_from_state_file(state_file) {
        return (settings, ProxySource::StateFile);
    }
    resolve_options_env(options, env)
}

/// Effective proxy settings for this process: state file, then explicit
/// options, then the real environment.
pub fn resolve(options: &ProxySettings) -> io::Result<(ProxySettings, ProxySource)> {
    let path = paths::proxy_state_path()?;
    Ok(resolve_from(&path, options, &|k| std::env::var(k).ok()))
}

/// Effective settings for the build phase (`install proxy`): explicit options
/// then the real environment. The state file is skipped so a re-install can
/// replace stale values.
pub fn resolve_build(options: &ProxySettings) -> (ProxySettings, ProxySource) {
    resolve_options_env(options, &|k| std::env::var(k).ok())
}

/// Persist the effective settings for later shell starts. A rebuild fully
/// replaces the file.
pub fn write_state(path: &Path, settings: &ProxySettings) -> io::Result<()> {
    state::write_kv_file(path, &settings.pairs())
}

/// Warn (but do not fail) about proxy values that are not valid URLs; the
/// surrounding tooling performs only JSON-schema type checks, so this is the
/// one place a typo gets surfaced.
pub fn warn_on_invalid_urls(settings: &ProxySettings) {
    let use_err = crate::color::color_enabled_stderr();
    for (name, value) in [("http_proxy", &settings.http), ("https_proxy", &settings.https)] {
        if let Some(v) = value {
            if Url::parse(v).is_err() {
                crate::color::log_warn_stderr(
                    use_err,
                    &format!("featurekit: {name} does not look like a URL: {v}"),
                );
            }
        }
    }
}

/// Render the apt proxy drop-in for the `apt_proxy` feature option.
pub fn apt_conf_body(settings: &ProxySettings) -> io::Result<String> {
    let mut f = ShellFile::new();
    if let Some(v) = settings.http.as_deref() {
        f.push(format!("Acquire::http::Proxy \"{v}\";"));
    }
    if let Some(v) = settings.https.as_deref() {
        f.push(format!("Acquire::https::Proxy \"{v}\";"));
    }
    f.build()
}

/// Write the apt drop-in under the (overridable) apt conf directory.
pub fn write_apt_conf(settings: &ProxySettings) -> io::Result<()> {
    let body = apt_conf_body(settings)?;
    if body.is_empty() {
        return Ok(());
    }
    let dir = paths::apt_conf_dir();
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("99-featurekit-proxy"), body)
}
