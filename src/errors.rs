//! Error mapping guide:
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - Missing optional configuration is never an error: absent provider or
//!   proxy settings leave variables unset and exit 0.
//! - Missing requirements for installation (npm absent, install failure)
//!   abort the build step with a non-zero status; no retry policy.
use std::io;

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Lightweight error enum for installer failures, keeping user-visible strings
/// separate from exit-code mapping.
#[derive(Debug)]
pub enum InstallError {
    Io(std::io::Error),
    Message(String),
}

impl From<std::io::Error> for InstallError {
    fn from(e: std::io::Error) -> Self {
        InstallError::Io(e)
    }
}

/// Convert InstallError to exit code (parity with io::Error mapping).
pub fn exit_code_for_install_error(e: &InstallError) -> u8 {
    match e {
        InstallError::Io(ioe) => exit_code_for_io_error(ioe),
        InstallError::Message(_) => 1,
    }
}

/// Render a user-facing string for InstallError.
pub fn display_for_install_error(e: &InstallError) -> String {
    match e {
        InstallError::Io(ioe) => ioe.to_string(),
        InstallError::Message(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_127() {
        let e = io::Error::new(io::ErrorKind::NotFound, "npm not found");
        assert_eq!(exit_code_for_io_error(&e), 127);
        assert_eq!(exit_code_for_install_error(&InstallError::Io(e)), 127);
    }

    #[test]
    fn test_other_errors_map_to_1() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(exit_code_for_io_error(&e), 1);
        let m = InstallError::Message("install failed".to_string());
        assert_eq!(exit_code_for_install_error(&m), 1);
        assert_eq!(display_for_install_error(&m), "install failed");
    }
}
