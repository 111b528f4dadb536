use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Structured subprocess execution with explicit environment injection.
///
/// Used for the installer step: stdout/stderr are inherited so the output
/// lands in the image build log, and proxy variables are injected in both
/// upper- and lowercase forms (tools disagree on which one they honor).
#[derive(Debug, Clone, Default)]
pub struct ExecRequest {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl ExecRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, a: impl Into<String>) -> Self {
        self.args.push(a.into());
        self
    }

    pub fn env(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.envs.push((k.into(), v.into()));
        self
    }

    /// Stable single-line preview of the command (without env), for --verbose/--dry-run.
    pub fn preview(&self) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.args.iter().cloned());
        super::shell_join(&words)
    }

    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.envs {
            cmd.env(k, v);
        }
        cmd.status()
            .with_context(|| format!("failed to run {}", self.program))
    }
}
