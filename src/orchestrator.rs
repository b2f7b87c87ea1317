//! Walks [`PLAN`] and turns operator answers into side effects.
//!
//! Every step is looked up in the plan table for its failure policy, so the
//! control flow here only decides *whether* a step runs and *what* it does.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::{
    config::{Connection, ConnectionKind, DataSpeed, InstallationChoice},
    error::InstallerError,
    probe::CapabilityProbe,
    prompt::Prompter,
    settings::{OsKind, Settings},
    steps::{
        connection, interface,
        packages::{Package, PackageInstaller, CORE_PACKAGES, OPTIONAL_PACKAGES},
        permissions,
        prerequisites::{self, PythonVersion},
        rns_config::ConfigDocument,
        summary, titled_steps, FailurePolicy, Step, StepResult, StepSpec, PLAN,
    },
    system::System,
    ui::Reporter,
};

// ── Collaborators ─────────────────────────────────────────────────────────────

/// The external world as seen by the orchestrator.
pub struct Services<'a> {
    pub prompt: &'a mut dyn Prompter,
    pub ui: &'a dyn Reporter,
    pub system: &'a dyn System,
    pub packages: &'a dyn PackageInstaller,
    pub probe: &'a dyn CapabilityProbe,
}

// ── Results ───────────────────────────────────────────────────────────────────

/// What the run did, for the summary and for callers.
#[derive(Debug, Default)]
pub struct RunReport {
    pub python: Option<PythonVersion>,
    pub installed: Vec<&'static str>,
    /// Failures the operator chose to continue past, plus warnings.
    pub failures: Vec<StepResult>,
    pub interface_path: Option<PathBuf>,
    pub choice: Option<InstallationChoice>,
    pub config_path: Option<PathBuf>,
    pub config_incomplete: bool,
    pub relogin_required: bool,
}

#[derive(Debug)]
pub enum Outcome {
    /// The operator said no at the first prompt.
    Declined,
    Completed(RunReport),
}

/// Process exit status for a finished run.
pub fn exit_code(result: &Result<Outcome, InstallerError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) if e.is_cancellation() => 0,
        Err(_) => 1,
    }
}

enum Flow {
    Continue,
    Stop,
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

pub struct Installer<'a> {
    settings: &'a Settings,
    svc: Services<'a>,
    kind: Option<ConnectionKind>,
    connection: Option<Connection>,
    speed: DataSpeed,
    report: RunReport,
}

impl<'a> Installer<'a> {
    pub fn new(settings: &'a Settings, svc: Services<'a>) -> Self {
        Self {
            settings,
            svc,
            kind: None,
            connection: None,
            speed: DataSpeed::default(),
            report: RunReport::default(),
        }
    }

    /// Runs every applicable step in order.
    ///
    /// Returns `Err` for fatal failures, an operator abort, or cancellation.
    pub fn run(mut self) -> Result<Outcome, InstallerError> {
        let total = titled_steps();
        let mut number = 0;

        for spec in PLAN {
            if self.skips(spec.step) {
                debug!(step = ?spec.step, "skipped");
                continue;
            }
            if let Some(title) = spec.title {
                number += 1;
                self.svc.ui.step(number, total, title);
            }

            debug!(step = ?spec.step, "entering step");
            match self.execute(spec).map_err(InstallerError::classify)? {
                Flow::Continue => {}
                Flow::Stop => {
                    info!(step = ?spec.step, "run stopped by operator");
                    return Ok(Outcome::Declined);
                }
            }
        }

        Ok(Outcome::Completed(self.report))
    }

    fn skips(&self, step: Step) -> bool {
        let configuring = !matches!(self.kind, None | Some(ConnectionKind::Skip));
        match step {
            Step::ResolveEndpoint | Step::ConfigureSpeed | Step::WriteConfig => !configuring,
            Step::ConfigureSerialPermissions => {
                !(self.settings.os == OsKind::Linux && self.kind == Some(ConnectionKind::Serial))
            }
            _ => false,
        }
    }

    fn execute(&mut self, spec: &StepSpec) -> Result<Flow, InstallerError> {
        let policy = spec.on_failure;
        match spec.step {
            Step::ConfirmIntent => return self.confirm_intent(),

            Step::CheckPrerequisites => {
                match prerequisites::check(self.svc.system, self.svc.ui) {
                    Ok(version) => self.report.python = Some(version),
                    Err(e) => {
                        let failure = StepResult::failed("Checking prerequisites", e.to_string());
                        self.on_failure(policy, failure, e)?;
                    }
                }
            }

            Step::InstallCorePackages => {
                if self
                    .svc
                    .prompt
                    .ask_yes_no("Install required Python packages?", true)?
                {
                    for package in &CORE_PACKAGES {
                        self.install_package(package, policy)?;
                    }
                } else {
                    self.svc.ui.warning("Skipping package installation.");
                }
            }

            Step::InstallInterfaceFile => match interface::deploy(self.settings, self.svc.ui) {
                Ok(path) => self.report.interface_path = Some(path),
                Err(e) => {
                    let failure = StepResult::failed("Installing interface file", e.to_string());
                    self.on_failure(policy, failure, e)?;
                }
            },

            Step::ChooseConnectionType => {
                let kind = connection::choose_kind(&mut *self.svc.prompt)?;
                if kind == ConnectionKind::Skip {
                    self.svc.ui.info("Skipping connection configuration.");
                    self.report.choice = Some(InstallationChoice::Skip);
                }
                self.kind = Some(kind);
            }

            Step::ResolveEndpoint => {
                if let Some(kind) = self.kind {
                    self.connection = connection::resolve(
                        kind,
                        self.settings.os,
                        self.svc.probe,
                        &mut *self.svc.prompt,
                        self.svc.ui,
                    )?;
                }
            }

            Step::ConfigureSerialPermissions => {
                self.report.relogin_required = true;
                let result = permissions::configure(
                    self.svc.system,
                    self.settings.user.as_deref(),
                    self.svc.ui,
                );
                if !result.success {
                    let err = InstallerError::PermissionConfig(result.to_string());
                    self.on_failure(policy, result, err)?;
                }
            }

            Step::ConfigureSpeed => {
                self.speed = connection::choose_speed(&mut *self.svc.prompt, self.svc.ui)?;
            }

            Step::WriteConfig => self.write_config(policy)?,

            Step::InstallOptionalPackages => {
                for (package, question) in &OPTIONAL_PACKAGES {
                    if self.svc.prompt.ask_yes_no(question, false)? {
                        self.install_package(package, policy)?;
                    }
                }
            }

            Step::Summary => summary::print(&self.report, self.svc.ui),
        }
        Ok(Flow::Continue)
    }

    // ── Steps with more than one outcome ─────────────────────────────────────

    fn confirm_intent(&mut self) -> Result<Flow, InstallerError> {
        let ui = self.svc.ui;
        ui.banner();
        ui.kv_box(
            "This installer sets up",
            &[
                ("rns", "Reticulum Network Stack"),
                ("meshtastic", "Meshtastic Python library"),
                ("interface", "RNS Meshtastic interface"),
                ("optional", "NomadNet, rnsh, Sideband"),
            ],
        );
        ui.line("");

        if self.svc.prompt.ask_yes_no("Continue with installation?", true)? {
            Ok(Flow::Continue)
        } else {
            ui.info("Installation cancelled");
            Ok(Flow::Stop)
        }
    }

    fn install_package(
        &mut self,
        package: &Package,
        policy: FailurePolicy,
    ) -> Result<(), InstallerError> {
        let result = self.svc.packages.install(package);
        if result.success {
            self.svc
                .ui
                .success(&format!("{} completed", result.description));
            self.report.installed.push(package.name);
            return Ok(());
        }

        let err = InstallerError::Install {
            package: package.name.to_string(),
            detail: result.detail.clone().unwrap_or_default(),
        };
        self.on_failure(policy, result, err)
    }

    fn write_config(&mut self, policy: FailurePolicy) -> Result<(), InstallerError> {
        let Some(connection) = self.connection.clone() else {
            return Ok(());
        };
        let choice = InstallationChoice::Configure {
            connection,
            speed: self.speed,
        };
        info!(kind = ?choice.kind(), speed = self.speed.code(), "writing configuration");

        if let Some(doc) = ConfigDocument::for_choice(&choice) {
            self.svc.ui.info("Creating Reticulum configuration…");
            let path = self.settings.config_file();
            match doc.persist(&path) {
                Ok(()) => {
                    self.svc
                        .ui
                        .success(&format!("Configuration saved to {}", path.display()));
                    self.report.config_path = Some(path);
                }
                Err(e) => {
                    self.report.config_incomplete = true;
                    let failure =
                        StepResult::failed("Writing Reticulum configuration", e.to_string());
                    self.on_failure(policy, failure, e)?;
                }
            }
        }
        self.report.choice = Some(choice);
        Ok(())
    }

    // ── Failure policy ────────────────────────────────────────────────────────

    /// Applies the step's policy to a failure. `Ok` means the run goes on.
    fn on_failure(
        &mut self,
        policy: FailurePolicy,
        failure: StepResult,
        err: InstallerError,
    ) -> Result<(), InstallerError> {
        if err.is_cancellation() {
            return Err(InstallerError::Cancelled);
        }

        match policy {
            FailurePolicy::Fatal | FailurePolicy::NotApplicable => {
                warn!(error = %err, "fatal step failure");
                Err(err)
            }
            FailurePolicy::AskOperator => {
                self.svc.ui.error(&failure.to_string());
                if self.svc.prompt.ask_yes_no("Continue anyway?", false)? {
                    warn!(failure = %failure, "operator continued past failure");
                    self.report.failures.push(failure);
                    Ok(())
                } else {
                    Err(InstallerError::Aborted(Box::new(err)))
                }
            }
            FailurePolicy::Warn => {
                warn!(failure = %failure, "non-fatal step failure");
                self.svc.ui.warning(&failure.to_string());
                self.report.failures.push(failure);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(exit_code(&Ok(Outcome::Declined)), 0);
        assert_eq!(exit_code(&Ok(Outcome::Completed(RunReport::default()))), 0);
        assert_eq!(exit_code(&Err(InstallerError::Cancelled)), 0);
        assert_eq!(
            exit_code(&Err(InstallerError::Prerequisite("pip missing".into()))),
            1
        );
        assert_eq!(
            exit_code(&Err(InstallerError::Aborted(Box::new(
                InstallerError::Install {
                    package: "rns".into(),
                    detail: String::new(),
                }
            )))),
            1
        );
    }
}
