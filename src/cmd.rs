use std::{
    ffi::OsStr,
    io,
    process::{Command, Output, Stdio},
};

use tracing::debug;

use crate::{error::InstallerError, ui};

// ── Internal helpers ──────────────────────────────────────────────────────────

fn display_name(program: &OsStr) -> String {
    program.to_string_lossy().into_owned()
}

fn not_found_or_io(program: &OsStr, err: io::Error) -> InstallerError {
    if err.kind() == io::ErrorKind::NotFound {
        InstallerError::CommandNotFound(display_name(program))
    } else {
        InstallerError::Io(err)
    }
}

// ── Captured output ───────────────────────────────────────────────────────────

/// Exit status and both output streams of a finished command.
#[derive(Debug, Clone)]
pub struct Captured {
    pub success: bool,
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Text worth showing the operator: stderr if present, else stdout.
    pub fn diagnostic(&self) -> String {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim().to_string()
        } else {
            err.to_string()
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs a command with stdout and stderr captured. A non-zero exit is not an
/// error here; callers inspect [`Captured::success`].
pub fn run_captured<P, A>(program: P, args: &[A]) -> Result<Captured, InstallerError>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    debug!(program = %display_name(program), "running command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| not_found_or_io(program, e))?;

    let captured = Captured::from_output(output);
    debug!(program = %display_name(program), code = captured.code, "command finished");
    Ok(captured)
}

/// Same as [`run_captured`] while a spinner shows `spin_msg`.
pub fn run_with_spinner<P, A>(
    program: P,
    args: &[A],
    spin_msg: &str,
) -> Result<Captured, InstallerError>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let pb = ui::spinner(spin_msg);
    let result = run_captured(program, args);
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_prefers_stderr() {
        let c = Captured {
            success: false,
            code: 1,
            stdout: "Collecting rns\n".into(),
            stderr: "  ERROR: no matching distribution\n".into(),
        };
        assert_eq!(c.diagnostic(), "ERROR: no matching distribution");
    }

    #[test]
    fn diagnostic_falls_back_to_stdout() {
        let c = Captured {
            success: false,
            code: 2,
            stdout: "usage: pip\n".into(),
            stderr: "   \n".into(),
        };
        assert_eq!(c.diagnostic(), "usage: pip");
    }

    #[test]
    fn missing_program_maps_to_not_found() {
        let err = run_captured("rns-mesh-setup-definitely-missing", &["--version"])
            .expect_err("program should not exist");
        assert!(matches!(err, InstallerError::CommandNotFound(ref p) if p == "rns-mesh-setup-definitely-missing"));
    }
}
