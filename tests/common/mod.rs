#![allow(dead_code)]
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_featurekit")
}

/// Command with HOME redirected into a tempdir and ambient proxy/color env
/// scrubbed so the host environment cannot leak into assertions.
pub fn cmd(home: &Path, args: &[&str]) -> Command {
    let mut c = Command::new(bin());
    c.args(args);
    c.env("HOME", home);
    c.env("NO_COLOR", "1");
    for k in [
        "HTTP_PROXY",
        "HTTPS_PROXY",
        "NO_PROXY",
        "http_proxy",
        "https_proxy",
        "no_proxy",
        "FEATUREKIT_COLOR",
        "FEATUREKIT_SKIP_INSTALL",
        "FEATUREKIT_APT_CONF_DIR",
    ] {
        c.env_remove(k);
    }
    c
}

pub fn run(home: &Path, args: &[&str]) -> Output {
    cmd(home, args).output().expect("run featurekit")
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

pub fn state_dir(home: &Path) -> std::path::PathBuf {
    home.join(".config").join("devcontainer")
}

pub fn write_provider(home: &Path, name: &str, auth: Option<&str>, base_url: Option<&str>) {
    let dir = home.join(".claude").join("providers").join(name);
    fs::create_dir_all(&dir).unwrap();
    if let Some(a) = auth {
        fs::write(dir.join("auth"), a).unwrap();
    }
    if let Some(b) = base_url {
        fs::write(dir.join("base_url"), b).unwrap();
    }
}

pub fn write_provider_state(home: &Path, id: &str) {
    let dir = state_dir(home);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("provider"), format!("{id}\n")).unwrap();
}

pub fn write_proxy_state(home: &Path, body: &str) {
    let dir = state_dir(home);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("proxy"), body).unwrap();
}

pub fn write_default_credentials(home: &Path, token: &str) {
    let dir = home.join(".claude");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(".credentials"), token).unwrap();
}
