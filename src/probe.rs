use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{cmd, settings::OsKind};

// ── Data types ────────────────────────────────────────────────────────────────

/// Endpoints found on the host, plus a warning when discovery was degraded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub endpoints: Vec<String>,
    pub warning: Option<String>,
}

impl Discovery {
    pub fn found(endpoints: Vec<String>) -> Self {
        Self {
            endpoints: filter_endpoints(endpoints),
            warning: None,
        }
    }

    pub fn degraded(warning: impl Into<String>) -> Self {
        Self {
            endpoints: Vec::new(),
            warning: Some(warning.into()),
        }
    }
}

/// Lists connection endpoints available on this host.
pub trait CapabilityProbe {
    fn discover_endpoints(&self, os: OsKind) -> Discovery;
}

/// Device-node patterns scanned on Linux, in order.
pub const LINUX_PATTERNS: [&str; 2] = ["ttyUSB*", "ttyACM*"];
/// Device-node patterns scanned on macOS.
pub const MACOS_PATTERNS: [&str; 1] = ["cu.*"];

pub const PYSERIAL_MISSING: &str = "pyserial not installed yet, cannot detect COM ports";

// ── System implementation ─────────────────────────────────────────────────────

/// Scans the device directory on POSIX hosts and asks pyserial on Windows.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    pub device_dir: PathBuf,
    pub python: PathBuf,
}

impl CapabilityProbe for SystemProbe {
    fn discover_endpoints(&self, os: OsKind) -> Discovery {
        let discovery = match os {
            OsKind::Linux => Discovery::found(self.scan(&LINUX_PATTERNS)),
            OsKind::MacOs => Discovery::found(self.scan(&MACOS_PATTERNS)),
            OsKind::Windows => self.list_com_ports(),
            OsKind::Other => Discovery::default(),
        };
        debug!(%os, count = discovery.endpoints.len(), "endpoint discovery finished");
        discovery
    }
}

impl SystemProbe {
    /// Globs each pattern under the device directory and concatenates the
    /// matches, pattern by pattern. Unreadable entries are skipped.
    fn scan(&self, patterns: &[&str]) -> Vec<String> {
        let dir = glob::Pattern::escape(&self.device_dir.to_string_lossy());
        let mut found = Vec::new();

        for pattern in patterns {
            let full = Path::new(&dir).join(pattern);
            let full = full.to_string_lossy();
            let paths = match glob::glob(&full) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!(pattern = %full, error = %e, "invalid device pattern");
                    continue;
                }
            };
            for entry in paths {
                match entry {
                    Ok(path) => found.push(path.to_string_lossy().into_owned()),
                    Err(e) => warn!(error = %e, "skipping unreadable device entry"),
                }
            }
        }
        found
    }

    /// Uses pyserial's port lister, which only exists once `pyserial` is installed.
    fn list_com_ports(&self) -> Discovery {
        let captured = match cmd::run_captured(&self.python, &["-m", "serial.tools.list_ports", "-q"]) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "pyserial port listing unavailable");
                return Discovery::degraded(PYSERIAL_MISSING);
            }
        };

        if captured.success {
            return Discovery::found(captured.stdout.lines().map(str::to_string).collect());
        }

        // list_ports exits 1 with no output when there is simply nothing attached.
        if captured.stderr.contains("No module named") {
            Discovery::degraded(PYSERIAL_MISSING)
        } else {
            Discovery::default()
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Trims entries and drops blanks and repeats, keeping first-seen order.
pub fn filter_endpoints(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let entry = entry.trim();
        if entry.is_empty() || out.iter().any(|e| e == entry) {
            continue;
        }
        out.push(entry.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn probe_in(dir: &std::path::Path) -> SystemProbe {
        SystemProbe {
            device_dir: dir.to_path_buf(),
            python: PathBuf::from("python3"),
        }
    }

    #[test]
    fn filter_drops_blanks_and_duplicates() {
        let raw = vec![
            "COM3".to_string(),
            "".to_string(),
            "  COM4  ".to_string(),
            "COM3".to_string(),
            "   ".to_string(),
        ];
        assert_eq!(filter_endpoints(raw), vec!["COM3", "COM4"]);
    }

    #[test]
    fn linux_scan_concatenates_patterns_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ttyACM0", "ttyUSB0", "ttyS0", "null"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let found = probe_in(dir.path()).discover_endpoints(OsKind::Linux);
        let usb = dir.path().join("ttyUSB0").to_string_lossy().into_owned();
        let acm = dir.path().join("ttyACM0").to_string_lossy().into_owned();

        assert_eq!(found.endpoints, vec![usb, acm]);
        assert!(found.warning.is_none());
    }

    #[test]
    fn macos_scan_uses_callout_devices() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["cu.usbserial-0001", "tty.usbserial-0001", "ttyUSB0"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let found = probe_in(dir.path()).discover_endpoints(OsKind::MacOs);
        assert_eq!(found.endpoints.len(), 1);
        assert!(found.endpoints[0].ends_with("cu.usbserial-0001"));
    }

    #[test]
    fn no_devices_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let found = probe_in(dir.path()).discover_endpoints(OsKind::Linux);
        assert!(found.endpoints.is_empty());
        assert!(found.warning.is_none());
    }

    #[test]
    fn missing_device_dir_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let found = probe_in(&dir.path().join("absent")).discover_endpoints(OsKind::Linux);
        assert!(found.endpoints.is_empty());
    }

    #[test]
    fn windows_without_python_degrades_with_warning() {
        let probe = SystemProbe {
            device_dir: PathBuf::from("/dev"),
            python: PathBuf::from("rns-mesh-setup-no-such-python"),
        };
        let found = probe.discover_endpoints(OsKind::Windows);
        assert!(found.endpoints.is_empty());
        assert_eq!(found.warning.as_deref(), Some(PYSERIAL_MISSING));
    }

    #[test]
    fn device_dir_metacharacters_are_literal() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("dev[1]");
        fs::create_dir(&dir).unwrap();
        File::create(dir.join("ttyUSB3")).unwrap();
        File::create(root.path().join("ttyUSB9")).unwrap();

        let found = probe_in(&dir).discover_endpoints(OsKind::Linux);
        assert_eq!(found.endpoints.len(), 1);
        assert!(found.endpoints[0].ends_with("ttyUSB3"));
    }

    #[test]
    fn patterns_are_globs() {
        assert!(LINUX_PATTERNS.iter().chain(&MACOS_PATTERNS).all(|p| p.ends_with('*')));
    }

    #[test]
    fn other_platforms_discover_nothing() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("ttyUSB0")).unwrap();
        let found = probe_in(dir.path()).discover_endpoints(OsKind::Other);
        assert_eq!(found, Discovery::default());
    }
}
