use std::fmt;

use tracing::info;

use crate::{error::InstallerError, system::System, ui::Reporter};

/// Oldest Python the Reticulum stack supports.
pub const MIN_PYTHON: PythonVersion = PythonVersion {
    major: 3,
    minor: 7,
    patch: 0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    /// Parses `Python 3.11.2`, `3.12.0rc1` and similar; missing parts are 0.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text
            .split_whitespace()
            .find(|w| w.starts_with(|c: char| c.is_ascii_digit()))?;

        let mut parts = raw.split('.').map(|p| {
            let digits: String = p.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        });

        let major = parts.next()??;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);
        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Verifies the interpreter version and pip. Any failure is a prerequisite error.
pub fn check(system: &dyn System, ui: &dyn Reporter) -> Result<PythonVersion, InstallerError> {
    ui.info("Checking Python version…");

    let raw = system.python_version().map_err(|e| {
        InstallerError::Prerequisite(format!("Python {}+ is required ({})", MIN_PYTHON, e))
    })?;

    let version = PythonVersion::parse(&raw).ok_or_else(|| {
        InstallerError::Prerequisite(format!("Could not read Python version from '{}'", raw))
    })?;

    if version < MIN_PYTHON {
        return Err(InstallerError::Prerequisite(format!(
            "Python {}+ required, but you have {}",
            MIN_PYTHON, version
        )));
    }
    ui.success(&format!("Python {}", version));

    if !system.has_pip() {
        return Err(InstallerError::Prerequisite(
            "pip is not installed. Please install pip first.".to_string(),
        ));
    }
    ui.success("pip is installed");

    info!(%version, "prerequisites satisfied");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_version_strings() {
        assert_eq!(
            PythonVersion::parse("Python 3.11.2"),
            Some(PythonVersion { major: 3, minor: 11, patch: 2 })
        );
        assert_eq!(
            PythonVersion::parse("Python 3.13.0rc1\n"),
            Some(PythonVersion { major: 3, minor: 13, patch: 0 })
        );
        assert_eq!(
            PythonVersion::parse("3.8"),
            Some(PythonVersion { major: 3, minor: 8, patch: 0 })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(PythonVersion::parse("Python"), None);
        assert_eq!(PythonVersion::parse(""), None);
    }

    #[test]
    fn ordering_respects_minor_numbers() {
        let old = PythonVersion::parse("Python 3.6.15").unwrap();
        let new = PythonVersion::parse("Python 3.10.0").unwrap();
        assert!(old < MIN_PYTHON);
        assert!(new > MIN_PYTHON);
    }
}
