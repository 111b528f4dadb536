#![allow(clippy::module_name_repetitions)]
//! Small utilities: shell escaping/quoting and the shell-file builder.

pub mod exec;
pub mod shell_file;

pub use shell_file::ShellFile;

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

/// Extract outer single or double quotes if the whole string is wrapped.
pub fn strip_outer_quotes(s: &str) -> String {
    if s.len() >= 2 {
        let b = s.as_bytes();
        let first = b[0] as char;
        let last = b[s.len() - 1] as char;
        if (first == '\'' && last == '\'') || (first == '"' && last == '"') {
            return s[1..s.len() - 1].to_string();
        }
    }
    s.to_string()
}
