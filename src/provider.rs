//! Per-provider API credential resolution.
//!
//! The provider identifier is a single-line state file written at image
//! build. An empty or absent identifier falls back to the default credential
//! file and the default endpoint (no base URL override). Missing provider
//! directories or auth files leave both variables unset, silently: a fresh
//! container must stay usable for setup. `doctor` surfaces that case.

use std::io;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::state;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub token: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderCredentials {
    /// (NAME, value) pairs for the variables that resolved, in stable order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = self.token.as_deref() {
            out.push(("ANTHROPIC_AUTH_TOKEN", v));
        }
        if let Some(v) = self.base_url.as_deref() {
            out.push(("ANTHROPIC_BASE_URL", v));
        }
        out
    }
}

/// A provider identifier must name a plain directory entry; path separators
/// or traversal would escape the providers root.
pub fn valid_provider_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/') && !id.contains('\\') && id != "." && id != ".."
}

/// Resolve credentials for `provider_id` against an explicit providers root
/// and default credential file (injected for testability).
pub fn resolve_in(
    providers_root: &Path,
    default_credentials: &Path,
    provider_id: Option<&str>,
) -> ProviderCredentials {
    match provider_id {
        None | Some("") => ProviderCredentials {
            token: state::read_single_line(default_credentials),
            base_url: None,
        },
        Some(id) => {
            if !valid_provider_id(id) {
                return ProviderCredentials::default();
            }
            let dir = providers_root.join(id);
            let token = state::read_single_line(&dir.join("auth"));
            if token.is_none() {
                // No auth file means no credentials at all; base_url alone is useless.
                return ProviderCredentials::default();
            }
            ProviderCredentials {
                token,
                base_url: state::read_single_line(&dir.join("base_url")),
            }
        }
    }
}

/// Resolve credentials using the persisted provider identifier and the
/// well-known layout under the user's home.
pub fn resolve_current() -> io::Result<ProviderCredentials> {
    let id = current_provider_id()?;
    Ok(resolve_in(
        &paths::providers_root()?,
        &paths::default_credentials_path()?,
        id.as_deref(),
    ))
}

/// The provider identifier persisted at build time, if any.
pub fn current_provider_id() -> io::Result<Option<String>> {
    Ok(state::read_single_line(&paths::provider_state_path()?))
}

/// True when a configured provider id has no backing auth file (doctor's
/// misconfiguration warning).
pub fn provider_auth_missing(providers_root: &Path, id: &str) -> bool {
    valid_provider_id(id) && !providers_root.join(id).join("auth").is_file()
}

/// Directory of a provider, for doctor listings.
pub fn provider_dir(providers_root: &Path, id: &str) -> PathBuf {
    providers_root.join(id)
}
