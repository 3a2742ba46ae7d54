//! Enable the host sub-plugins WikiLearn depends on.

use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::EnableConfig;
use crate::error::EnableError;

/// Output of a successful `plugins enable` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableReport {
    pub plugins: Vec<String>,
    pub stdout: String,
}

/// Runs `<program> plugins enable <plugins...>` on the host.
///
/// The program is executed directly, not through a shell.
#[derive(Debug, Clone)]
pub struct EnablePluginsCommand {
    program: String,
    plugins: Vec<String>,
}

impl EnablePluginsCommand {
    pub fn new(program: impl Into<String>, plugins: Vec<String>) -> Self {
        Self {
            program: program.into(),
            plugins,
        }
    }

    pub fn from_config(config: &EnableConfig) -> Self {
        Self::new(config.program.clone(), config.plugins.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["plugins".to_string(), "enable".to_string()];
        args.extend(self.plugins.iter().cloned());
        args
    }

    pub fn execute(&self) -> Result<EnableReport, EnableError> {
        let args = self.args();
        info!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            debug!("{} exited with {}", self.program, output.status);
            if !stderr.trim().is_empty() {
                debug!("Stderr:\n{}", stderr.trim());
            }
            return Err(EnableError::SubprocessFailed {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(EnableReport {
            plugins: self.plugins.clone(),
            stdout,
        })
    }
}
