//! Individual installer steps and the table that orders them.

pub mod connection;
pub mod interface;
pub mod packages;
pub mod permissions;
pub mod prerequisites;
pub mod rns_config;
pub mod summary;

use std::fmt;

// ── Step results ──────────────────────────────────────────────────────────────

/// Outcome of one side-effecting action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub success: bool,
    pub description: String,
    pub detail: Option<String>,
}

impl StepResult {
    pub fn ok(description: impl Into<String>) -> Self {
        Self {
            success: true,
            description: description.into(),
            detail: None,
        }
    }

    pub fn failed(description: impl Into<String>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            success: false,
            description: description.into(),
            detail: if detail.trim().is_empty() { None } else { Some(detail) },
        }
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(d) => write!(f, "{}: {}", self.description, d),
            None => write!(f, "{}", self.description),
        }
    }
}

// ── Step table ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ConfirmIntent,
    CheckPrerequisites,
    InstallCorePackages,
    InstallInterfaceFile,
    ChooseConnectionType,
    ResolveEndpoint,
    ConfigureSerialPermissions,
    ConfigureSpeed,
    WriteConfig,
    InstallOptionalPackages,
    Summary,
}

/// What a failure inside a step does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run with a failure status.
    Fatal,
    /// Ask "continue anyway?"; declining stops the run.
    AskOperator,
    /// Record it, warn, keep going.
    Warn,
    /// The step has no failure mode of its own.
    NotApplicable,
}

#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub step: Step,
    /// Steps with a title get a numbered header.
    pub title: Option<&'static str>,
    pub on_failure: FailurePolicy,
}

const fn spec(step: Step, title: Option<&'static str>, on_failure: FailurePolicy) -> StepSpec {
    StepSpec {
        step,
        title,
        on_failure,
    }
}

/// Every run walks this table top to bottom; skip rules live in the orchestrator.
pub const PLAN: &[StepSpec] = &[
    spec(Step::ConfirmIntent, None, FailurePolicy::NotApplicable),
    spec(
        Step::CheckPrerequisites,
        Some("Checking Prerequisites"),
        FailurePolicy::Fatal,
    ),
    spec(
        Step::InstallCorePackages,
        Some("Installing Core Packages"),
        FailurePolicy::AskOperator,
    ),
    spec(
        Step::InstallInterfaceFile,
        Some("Installing Meshtastic Interface"),
        FailurePolicy::Fatal,
    ),
    spec(
        Step::ChooseConnectionType,
        Some("Configuring Meshtastic Connection"),
        FailurePolicy::NotApplicable,
    ),
    spec(Step::ResolveEndpoint, None, FailurePolicy::NotApplicable),
    spec(Step::ConfigureSerialPermissions, None, FailurePolicy::Warn),
    spec(Step::ConfigureSpeed, None, FailurePolicy::NotApplicable),
    spec(Step::WriteConfig, None, FailurePolicy::Warn),
    spec(
        Step::InstallOptionalPackages,
        Some("Optional Applications"),
        FailurePolicy::AskOperator,
    ),
    spec(Step::Summary, None, FailurePolicy::NotApplicable),
];

/// Number of steps that print a numbered header.
pub fn titled_steps() -> usize {
    PLAN.iter().filter(|s| s.title.is_some()).count()
}
