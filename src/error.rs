use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Command '{0}' failed with exit code {1}")]
    CommandFailed(String, i32),

    #[error("Command '{0}' not found — is it installed?")]
    CommandNotFound(String),

    #[error("Prerequisite check failed: {0}")]
    Prerequisite(String),

    #[error("Failed to install {package}: {detail}")]
    Install { package: String, detail: String },

    #[error("Failed to install interface file {}: {reason}", .path.display())]
    InterfaceDeployment { path: PathBuf, reason: String },

    #[error("Failed to configure serial permissions: {0}")]
    PermissionConfig(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Installation aborted after: {0}")]
    Aborted(Box<InstallerError>),

    #[error("Installation cancelled by user")]
    Cancelled,

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl InstallerError {
    /// True for operator interrupts, however they reached us.
    ///
    /// `console` reports Ctrl-C inside a raw-mode read as an
    /// `Interrupted` I/O error, which dialoguer wraps again.
    pub fn is_cancellation(&self) -> bool {
        match self {
            InstallerError::Cancelled => true,
            InstallerError::Io(e) => e.kind() == io::ErrorKind::Interrupted,
            InstallerError::Prompt(dialoguer::Error::IO(e)) => {
                e.kind() == io::ErrorKind::Interrupted
            }
            _ => false,
        }
    }

    /// Collapses interrupted prompts into [`InstallerError::Cancelled`].
    pub fn classify(self) -> Self {
        if self.is_cancellation() {
            InstallerError::Cancelled
        } else {
            self
        }
    }
}
