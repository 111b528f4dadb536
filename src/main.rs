use std::io;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use featurekit::errors::InstallError;
use featurekit::install::{
    run_install_claude_code, run_install_proxy, ClaudeCodeOpts, ProxyInstallOpts,
};
use featurekit::proxy::ProxySettings;
use featurekit::{
    display_for_install_error, exit_code_for_install_error, feature, provider, proxy, shellrc,
};

mod cli;

use cli::{Cli, Command, InstallCmd};

/// `env`: resolve credentials and proxy from persisted state and print export
/// lines to stdout for the shell to eval. Reads only; exit 0 even when
/// nothing is configured.
fn run_env() -> io::Result<()> {
    let creds = provider::resolve_current()?;
    let (effective_proxy, _) = proxy::resolve(&ProxySettings::default())?;
    let out = shellrc::render_exports(&creds, &effective_proxy);
    io::stdout().write_all(out.as_bytes())
}

fn run_validate(dir: &str, verbose: bool) -> io::Result<()> {
    let manifests = feature::validate_features_dir(std::path::Path::new(dir))?;
    let use_err = featurekit::color_enabled_stderr();
    for m in &manifests {
        featurekit::log_info_stderr(
            use_err,
            &format!(
                "featurekit: feature '{}' v{}: {} options",
                m.id,
                m.version,
                m.options.len()
            ),
        );
        if verbose {
            eprintln!("  options: {}", m.option_ids().join(", "));
        }
    }
    Ok(())
}

fn dispatch(cli: &Cli) -> Result<(), InstallError> {
    match &cli.command {
        Command::Install { feature } => match feature {
            InstallCmd::Proxy {
                http_proxy,
                https_proxy,
                no_proxy,
                apt_proxy,
                enabled,
            } => run_install_proxy(&ProxyInstallOpts {
                proxy: ProxySettings {
                    http: http_proxy.clone(),
                    https: https_proxy.clone(),
                    no: no_proxy.clone(),
                },
                apt_proxy: *apt_proxy,
                enabled: *enabled,
                dry_run: cli.dry_run,
                verbose: cli.verbose,
            }),
            InstallCmd::ClaudeCode {
                version,
                provider,
                models,
                http_proxy,
                https_proxy,
                no_proxy,
                enabled,
            } => run_install_claude_code(&ClaudeCodeOpts {
                version: version.clone(),
                provider: provider.clone(),
                models: models.clone(),
                proxy: ProxySettings {
                    http: http_proxy.clone(),
                    https: https_proxy.clone(),
                    no: no_proxy.clone(),
                },
                enabled: *enabled,
                dry_run: cli.dry_run,
                verbose: cli.verbose,
            }),
        },
        Command::Env { shell } => {
            if shell != "sh" && shell != "bash" && shell != "zsh" {
                return Err(InstallError::Message(format!(
                    "featurekit: unsupported shell dialect '{shell}'"
                )));
            }
            Ok(run_env()?)
        }
        Command::Doctor => Ok(featurekit::doctor::run_doctor(cli.verbose)?),
        Command::Validate { dir } => Ok(run_validate(dir, cli.verbose)?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        featurekit::set_color_mode(mode);
    }

    match dispatch(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            let use_err = featurekit::color_enabled_stderr();
            featurekit::log_error_stderr(use_err, &display_for_install_error(&e));
            ExitCode::from(exit_code_for_install_error(&e))
        }
    }
}
