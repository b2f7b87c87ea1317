use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    error::InstallerError,
    settings::{Settings, INTERFACE_FILE_NAME},
    ui::Reporter,
};

/// Copies the Meshtastic interface into `~/.reticulum/interfaces`.
///
/// Without it the written configuration points at a type RNS cannot load,
/// so every failure here is an [`InstallerError::InterfaceDeployment`].
pub fn deploy(settings: &Settings, ui: &dyn Reporter) -> Result<PathBuf, InstallerError> {
    ui.info("Installing Meshtastic interface for RNS…");

    let source = &settings.interface_source;
    if !source.is_file() {
        return Err(InstallerError::InterfaceDeployment {
            path: source.clone(),
            reason: "interface file not found".to_string(),
        });
    }

    let dest_dir = settings.interfaces_dir();
    fs::create_dir_all(&dest_dir).map_err(|e| InstallerError::InterfaceDeployment {
        path: dest_dir.clone(),
        reason: e.to_string(),
    })?;

    let dest = dest_dir.join(INTERFACE_FILE_NAME);
    fs::copy(source, &dest).map_err(|e| InstallerError::InterfaceDeployment {
        path: dest.clone(),
        reason: e.to_string(),
    })?;

    info!(dest = %dest.display(), "interface deployed");
    ui.success(&format!("Interface installed to {}", dest.display()));
    Ok(dest)
}
