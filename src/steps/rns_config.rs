use std::{fmt, fs, path::Path};

use tracing::info;

use crate::{
    config::{Connection, DataSpeed, InstallationChoice},
    error::InstallerError,
};

/// Name of the single interface block.
pub const INTERFACE_NAME: &str = "Meshtastic Interface";
/// `type =` value RNS resolves to the deployed interface file.
pub const INTERFACE_TYPE: &str = "Meshtastic_Interface";

/// Fixed top-level sections: transport on, shared instance on well-known ports.
const PREAMBLE: &[(&str, &[(&str, &str)])] = &[
    (
        "reticulum",
        &[
            ("enable_transport", "yes"),
            ("share_instance", "yes"),
            ("shared_instance_port", "37428"),
            ("instance_control_port", "37429"),
        ],
    ),
    ("logging", &[("loglevel", "4")]),
];

/// A Reticulum configuration file with exactly one Meshtastic interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Interface keys in output order.
    entries: Vec<(&'static str, String)>,
}

impl ConfigDocument {
    /// Builds the document for a resolved connection.
    pub fn synthesize(connection: &Connection, speed: DataSpeed) -> Self {
        let mut entries = vec![
            ("type", INTERFACE_TYPE.to_string()),
            ("enabled", "yes".to_string()),
        ];

        let (key, value) = connection.parameter();
        if !value.trim().is_empty() {
            entries.push((key, value.trim().to_string()));
        }
        entries.push(("data_speed", speed.to_string()));

        Self { entries }
    }

    /// `None` when the operator skipped configuration: nothing is written then.
    pub fn for_choice(choice: &InstallationChoice) -> Option<Self> {
        match choice {
            InstallationChoice::Configure { connection, speed } => {
                Some(Self::synthesize(connection, *speed))
            }
            InstallationChoice::Skip => None,
        }
    }

    /// Looks up an interface key.
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes the document, replacing whatever was at `path`.
    ///
    /// The text goes to a sibling `.tmp` file first and is renamed into
    /// place, so an interrupted run never leaves a truncated config.
    pub fn persist(&self, path: &Path) -> Result<(), InstallerError> {
        let persist_err = |source| InstallerError::Persist {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(persist_err)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, self.render()).map_err(persist_err)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(persist_err(e));
        }

        info!(path = %path.display(), "configuration written");
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, keys) in PREAMBLE {
            writeln!(f, "[{}]", section)?;
            for (k, v) in *keys {
                writeln!(f, "{} = {}", k, v)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "[interfaces]")?;
        writeln!(f, "  [[{}]]", INTERFACE_NAME)?;
        for (k, v) in &self.entries {
            writeln!(f, "    {} = {}", k, v)?;
        }
        Ok(())
    }
}
