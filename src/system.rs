use std::path::PathBuf;

use tracing::{info, warn};

use crate::{cmd, error::InstallerError, steps::StepResult};

/// Host queries and privileged changes the workflow depends on.
pub trait System {
    /// Raw `python --version` output, e.g. `Python 3.11.2`.
    fn python_version(&self) -> Result<String, InstallerError>;

    /// Whether `pip` is usable for the interpreter.
    fn has_pip(&self) -> bool;

    /// Adds `user` to a supplementary group (needs sudo).
    fn add_user_to_group(&self, user: &str, group: &str) -> StepResult;
}

/// The real machine, driven through subprocesses.
#[derive(Debug, Clone)]
pub struct HostSystem {
    pub python: PathBuf,
}

impl HostSystem {
    pub fn new(python: PathBuf) -> Self {
        Self { python }
    }
}

impl System for HostSystem {
    fn python_version(&self) -> Result<String, InstallerError> {
        let captured = cmd::run_captured(&self.python, &["--version"])?;
        if !captured.success {
            return Err(InstallerError::CommandFailed(
                self.python.display().to_string(),
                captured.code,
            ));
        }
        // Python 2 printed its version on stderr.
        let text = if captured.stdout.trim().is_empty() {
            captured.stderr
        } else {
            captured.stdout
        };
        Ok(text.trim().to_string())
    }

    fn has_pip(&self) -> bool {
        let via_module = cmd::run_captured(&self.python, &["-m", "pip", "--version"])
            .map(|c| c.success)
            .unwrap_or(false);
        via_module || which::which("pip3").is_ok() || which::which("pip").is_ok()
    }

    fn add_user_to_group(&self, user: &str, group: &str) -> StepResult {
        let description = format!("Adding {} to the {} group", user, group);
        match cmd::run_captured("sudo", &["usermod", "-a", "-G", group, user]) {
            Ok(c) if c.success => {
                info!(user, group, "group membership updated");
                StepResult::ok(description)
            }
            Ok(c) => {
                warn!(user, group, code = c.code, "usermod failed");
                StepResult::failed(description, c.diagnostic())
            }
            Err(e) => {
                warn!(user, group, error = %e, "usermod could not run");
                StepResult::failed(description, e.to_string())
            }
        }
    }
}
