use clap::{Parser, Subcommand};

use featurekit::ColorMode;

#[derive(Parser, Debug)]
#[command(
    name = "featurekit",
    version,
    about = "Configure dev-container features: proxy wiring, Claude Code CLI and per-provider credentials."
)]
pub(crate) struct Cli {
    /// Print detailed execution info
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Prepare and print what would run, but do not execute or write
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Colorize stderr output: auto|always|never
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Run a feature installer (image build phase)
    Install {
        #[command(subcommand)]
        feature: InstallCmd,
    },
    /// Print export lines for the current shell to eval (shell start phase)
    Env {
        /// Target shell dialect (only sh-compatible output is produced)
        #[arg(long, default_value = "sh")]
        shell: String,
    },
    /// Run diagnostics to check state files and provider configuration
    Doctor,
    /// Validate bundled feature manifests
    Validate {
        /// Directory holding the feature definitions
        #[arg(default_value = "features")]
        dir: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum InstallCmd {
    /// Persist proxy settings for later shell starts
    Proxy {
        /// HTTP proxy URL
        #[arg(long = "http-proxy")]
        http_proxy: Option<String>,
        /// HTTPS proxy URL
        #[arg(long = "https-proxy")]
        https_proxy: Option<String>,
        /// Comma-separated proxy bypass list
        #[arg(long = "no-proxy")]
        no_proxy: Option<String>,
        /// Also write an apt proxy drop-in
        #[arg(long = "apt-proxy")]
        apt_proxy: bool,
        /// Feature enable switch (mirrors the `enabled` option)
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Install the Claude Code CLI and persist provider/model selection
    ClaudeCode {
        /// CLI version to install ("latest" leaves the package unpinned)
        #[arg(long, default_value = "latest")]
        version: String,
        /// Provider identifier under ~/.claude/providers (empty = default)
        #[arg(long, default_value = "")]
        provider: String,
        /// Model mapping spec: haiku:model,sonnet:model,opus:model
        #[arg(long, default_value = "")]
        models: String,
        /// HTTP proxy URL used during installation
        #[arg(long = "http-proxy")]
        http_proxy: Option<String>,
        /// HTTPS proxy URL used during installation
        #[arg(long = "https-proxy")]
        https_proxy: Option<String>,
        /// Comma-separated proxy bypass list
        #[arg(long = "no-proxy")]
        no_proxy: Option<String>,
        /// Feature enable switch (mirrors the `enabled` option)
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        enabled: bool,
    },
}
