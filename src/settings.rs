use std::{fmt, path::PathBuf};

use tracing::debug;

use crate::error::InstallerError;

/// Host platform family, as far as device discovery and permissions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl OsKind {
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "linux" => OsKind::Linux,
            "macos" => OsKind::MacOs,
            "windows" => OsKind::Windows,
            _ => OsKind::Other,
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsKind::Linux => write!(f, "Linux"),
            OsKind::MacOs => write!(f, "macOS"),
            OsKind::Windows => write!(f, "Windows"),
            OsKind::Other => write!(f, "other"),
        }
    }
}

/// Reticulum's per-user directory, relative to the home directory.
pub const RNS_DIR: &str = ".reticulum";
/// Interface implementation shipped next to the installer.
pub const INTERFACE_SOURCE: &str = "Interface/Meshtastic_Interface.py";
pub const INTERFACE_FILE_NAME: &str = "Meshtastic_Interface.py";

/// Host facts and paths resolved once at start-up.
#[derive(Debug, Clone)]
pub struct Settings {
    pub os: OsKind,
    /// `~/.reticulum`
    pub rns_dir: PathBuf,
    pub interface_source: PathBuf,
    /// Python interpreter that owns `pip`.
    pub python: PathBuf,
    /// Login name, used for the serial group membership.
    pub user: Option<String>,
    /// Directory scanned for serial device nodes.
    pub device_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, InstallerError> {
        let home = directories::BaseDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .ok_or(InstallerError::NoHomeDirectory)?;

        let settings = Self {
            os: OsKind::current(),
            rns_dir: home.join(RNS_DIR),
            interface_source: PathBuf::from(INTERFACE_SOURCE),
            python: find_python(),
            user: std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .ok()
                .filter(|u| !u.trim().is_empty()),
            device_dir: PathBuf::from("/dev"),
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// `~/.reticulum/config`
    pub fn config_file(&self) -> PathBuf {
        self.rns_dir.join("config")
    }

    /// `~/.reticulum/interfaces`
    pub fn interfaces_dir(&self) -> PathBuf {
        self.rns_dir.join("interfaces")
    }
}

/// First of `python3`, `python` on PATH; the bare name if neither resolves,
/// so the prerequisite step reports it missing.
fn find_python() -> PathBuf {
    ["python3", "python"]
        .iter()
        .find_map(|name| which::which(name).ok())
        .unwrap_or_else(|| PathBuf::from("python3"))
}
