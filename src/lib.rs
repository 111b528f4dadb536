//! featurekit: dev-container feature configurator.
//!
//! Architecture
//! - Binary glue (src/main.rs) orchestrates CLI parsing, exit-code mapping and dispatch.
//! - Build phase (`install proxy`, `install claude-code`) runs once during image build and
//!   persists small state files under ~/.config/devcontainer.
//! - Shell phase (`env`) runs from the user's rc on every interactive shell start, reads the
//!   state files and prints `export` lines for the shell to `eval`.
//!
//! Environment invariants (documented for contributors)
//! - FEATUREKIT_COLOR / NO_COLOR: crate-wide color control; wrappers preserve message text.
//! - FEATUREKIT_APT_CONF_DIR: overrides /etc/apt/apt.conf.d (tests).
//! - FEATUREKIT_SKIP_INSTALL: when "1", `install claude-code` skips the npm step but still
//!   performs all configuration (tests, pre-baked images).

pub mod color;
pub mod doctor;
pub mod errors;
pub mod feature;
pub mod install;
pub mod paths;
pub mod provider;
pub mod proxy;
pub mod shellrc;
pub mod state;
pub mod util;

pub use color::{
    color_enabled_stderr, log_error_stderr, log_info_stderr, log_warn_stderr, paint,
    set_color_mode, ColorMode,
};
pub use errors::{display_for_install_error, exit_code_for_install_error, exit_code_for_io_error};
pub use provider::ProviderCredentials;
pub use proxy::{ProxySettings, ProxySource};
