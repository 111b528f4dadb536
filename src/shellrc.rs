//! Shell rc patching and `env` export rendering.
//!
//! The rc block is marker-guarded so rebuilds never duplicate it. The block
//! itself only evals `featurekit env`; all resolution logic stays in this
//! binary so the shell side never goes stale.

use std::fs;
use std::io;
use std::path::Path;

use crate::provider::ProviderCredentials;
use crate::proxy::ProxySettings;
use crate::util::{shell_escape, ShellFile};

const MARKER_BEGIN: &str = "# >>> featurekit env >>>";
const MARKER_END: &str = "# <<< featurekit env <<<";

/// The block appended to the user's shell rc.
pub fn rc_block() -> io::Result<String> {
    let mut f = ShellFile::new();
    f.push(MARKER_BEGIN)
        .push("if command -v featurekit >/dev/null 2>&1; then")
        .push("  eval \"$(featurekit env)\"")
        .push("fi")
        .push(MARKER_END);
    f.build()
}

/// Append the rc block unless the marker is already present. Creates the file
/// when missing. Returns true when the file was modified.
pub fn patch_rc_file(path: &Path) -> io::Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };
    if existing.contains(MARKER_BEGIN) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = existing;
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&rc_block()?);
    fs::write(path, out)?;
    Ok(true)
}

/// Render `export NAME='value'` lines for everything that resolved. Output is
/// eval'd by the interactive shell; session-only, never persisted.
pub fn render_exports(creds: &ProviderCredentials, proxy: &ProxySettings) -> String {
    let mut out = String::new();
    for (name, value) in creds.pairs().into_iter().chain(proxy.pairs()) {
        out.push_str(&format!("export {name}={}\n", shell_escape(value)));
    }
    out
}
