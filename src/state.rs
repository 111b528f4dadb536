//! Flat state files: KEY=value lists and single-line values.
//!
//! These files are the cross-process settings channel between the image build
//! (single writer) and interactive shell starts (readers). A rebuild fully
//! replaces them; no locking is required.

use std::fs;
use std::io;
use std::path::Path;

use crate::util::{strip_outer_quotes, ShellFile};

/// Trim exactly one trailing newline (LF or CRLF); inner whitespace is preserved.
pub fn trim_trailing_newline(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

/// Read a single-line state file. Returns None when the file is absent or empty.
pub fn read_single_line(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let v = trim_trailing_newline(&raw);
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Write a single-line state file, creating parent directories as needed.
pub fn write_single_line(path: &Path, value: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{value}\n"))
}

/// Parse KEY=value lines. Blank lines and `#` comments are skipped; values may
/// carry optional outer quotes (shell-variable-assignment compatibility).
pub fn read_kv_file(path: &Path) -> io::Result<Vec<(String, String)>> {
    let raw = fs::read_to_string(path)?;
    let mut out = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            out.push((k.trim().to_string(), strip_outer_quotes(v.trim())));
        }
    }
    Ok(out)
}

/// Look up a single key in a KEY=value file; None when file or key is absent.
pub fn kv_lookup(path: &Path, key: &str) -> Option<String> {
    read_kv_file(path)
        .ok()?
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Write a KEY=value state file atomically enough for the sequential container
/// lifecycle (single writer, readers start later).
pub fn write_kv_file(path: &Path, pairs: &[(&str, &str)]) -> io::Result<()> {
    let mut file = ShellFile::new();
    for (k, v) in pairs {
        file.push(format!("{k}={v}"));
    }
    let body = file.build()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)
}
