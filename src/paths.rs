//! Well-known paths for state files and provider credential layout.

use std::env;
use std::io;
use std::path::PathBuf;

/// Resolve the user's home directory; HOME is respected so tests can redirect it.
pub fn home_dir() -> io::Result<PathBuf> {
    home::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "featurekit: unable to determine home directory",
        )
    })
}

/// Shared state directory written at image build and read at shell start.
pub fn state_dir() -> io::Result<PathBuf> {
    Ok(home_dir()?.join(".config").join("devcontainer"))
}

pub fn proxy_state_path() -> io::Result<PathBuf> {
    Ok(state_dir()?.join("proxy"))
}

pub fn provider_state_path() -> io::Result<PathBuf> {
    Ok(state_dir()?.join("provider"))
}

pub fn models_state_path() -> io::Result<PathBuf> {
    Ok(state_dir()?.join("models"))
}

/// Root of the per-provider credential layout (~/.claude/providers/<name>/).
pub fn providers_root() -> io::Result<PathBuf> {
    Ok(home_dir()?.join(".claude").join("providers"))
}

/// Default credential file used when no provider identifier is configured.
pub fn default_credentials_path() -> io::Result<PathBuf> {
    Ok(home_dir()?.join(".claude").join(".credentials"))
}

/// Directory for the optional apt proxy drop-in. Overridable for tests.
pub fn apt_conf_dir() -> PathBuf {
    env::var("FEATUREKIT_APT_CONF_DIR")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/etc/apt/apt.conf.d"))
}

/// Shell rc files to patch: ~/.bashrc always, ~/.zshrc only when it already exists.
pub fn shell_rc_paths() -> io::Result<Vec<PathBuf>> {
    let home = home_dir()?;
    let mut out = vec![home.join(".bashrc")];
    let zshrc = home.join(".zshrc");
    if zshrc.exists() {
        out.push(zshrc);
    }
    Ok(out)
}
