use std::path::PathBuf;

use tracing::{info, warn};

use crate::{cmd, steps::StepResult};

/// A pip distribution and the label shown while installing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub description: &'static str,
}

const fn package(name: &'static str, description: &'static str) -> Package {
    Package { name, description }
}

/// Installed in order behind a single confirmation.
pub const CORE_PACKAGES: [Package; 4] = [
    package("rns", "Reticulum Network Stack"),
    package("meshtastic", "Meshtastic Python library"),
    package("pyserial", "Serial port library"),
    package("pypubsub", "Publish-subscribe library"),
];

/// Each offered separately, default no.
pub const OPTIONAL_PACKAGES: [(Package, &str); 3] = [
    (
        package("nomadnet", "NomadNet"),
        "Install NomadNet (terminal-based mesh communication)?",
    ),
    (
        package("rnsh", "rnsh"),
        "Install rnsh (remote shell over RNS)?",
    ),
    (
        package("sbapp", "Sideband"),
        "Install Sideband (for Linux)?",
    ),
];

/// Installs one named package. No retries, no version pinning.
pub trait PackageInstaller {
    fn install(&self, package: &Package) -> StepResult;
}

// ── pip ───────────────────────────────────────────────────────────────────────

/// Runs `<python> -m pip install <name>` with output captured.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    pub python: PathBuf,
}

impl PipInstaller {
    pub fn new(python: PathBuf) -> Self {
        Self { python }
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, package: &Package) -> StepResult {
        let description = format!("Installing {}", package.description);
        let result = cmd::run_with_spinner(
            &self.python,
            &["-m", "pip", "install", package.name],
            &format!("{}…", description),
        );

        match result {
            Ok(c) if c.success => {
                info!(package = package.name, "installed");
                StepResult::ok(description)
            }
            Ok(c) => {
                warn!(package = package.name, code = c.code, "pip install failed");
                StepResult::failed(description, c.diagnostic())
            }
            Err(e) => {
                warn!(package = package.name, error = %e, "pip could not run");
                StepResult::failed(description, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_list_is_ordered() {
        let names: Vec<&str> = CORE_PACKAGES.iter().map(|p| p.name).collect();
        assert_eq!(names, ["rns", "meshtastic", "pyserial", "pypubsub"]);
    }

    #[test]
    fn optional_list_names_distributions() {
        let names: Vec<&str> = OPTIONAL_PACKAGES.iter().map(|(p, _)| p.name).collect();
        assert_eq!(names, ["nomadnet", "rnsh", "sbapp"]);
    }

    #[test]
    fn sideband_is_offered_as_linux_client() {
        let (package, question) = &OPTIONAL_PACKAGES[2];
        assert_eq!(package.name, "sbapp");
        assert_eq!(*question, "Install Sideband (for Linux)?");
    }

    #[test]
    fn missing_interpreter_reports_failure() {
        let pip = PipInstaller::new(PathBuf::from("rns-mesh-setup-no-such-python"));
        let result = pip.install(&CORE_PACKAGES[0]);
        assert!(!result.success);
        assert_eq!(result.description, "Installing Reticulum Network Stack");
        assert!(result.detail.is_some());
    }
}
