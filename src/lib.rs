//! Interactive installer for Reticulum (RNS) over Meshtastic radios.
//!
//! The binary wires the console implementations of [`prompt::Prompter`],
//! [`ui::Reporter`], [`system::System`], [`steps::packages::PackageInstaller`]
//! and [`probe::CapabilityProbe`] into an [`orchestrator::Installer`]; tests
//! substitute scripted ones.

pub mod cmd;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod probe;
pub mod prompt;
pub mod settings;
pub mod steps;
pub mod system;
pub mod ui;

pub use error::InstallerError;
pub use orchestrator::{exit_code, Installer, Outcome, RunReport, Services};
pub use settings::{OsKind, Settings};
