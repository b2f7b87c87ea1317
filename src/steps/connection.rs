use tracing::{debug, info};

use crate::{
    config::{Connection, ConnectionKind, DataSpeed},
    error::InstallerError,
    probe::CapabilityProbe,
    prompt::Prompter,
    settings::OsKind,
    ui::Reporter,
};

/// Asks how the radio is attached. Serial is the default.
pub fn choose_kind(prompt: &mut dyn Prompter) -> Result<ConnectionKind, InstallerError> {
    let options: Vec<String> = ConnectionKind::ALL
        .iter()
        .map(|k| k.display_name().to_string())
        .collect();

    let idx = prompt.ask_choice("How will you connect to your Meshtastic device?", &options, 0)?;
    let kind = ConnectionKind::ALL
        .get(idx)
        .copied()
        .unwrap_or(ConnectionKind::Serial);
    info!(?kind, "connection type chosen");
    Ok(kind)
}

/// Resolves the endpoint for a non-skip kind. Returns `None` for `Skip`.
pub fn resolve(
    kind: ConnectionKind,
    os: OsKind,
    probe: &dyn CapabilityProbe,
    prompt: &mut dyn Prompter,
    ui: &dyn Reporter,
) -> Result<Option<Connection>, InstallerError> {
    let connection = match kind {
        ConnectionKind::Serial => Connection::Serial {
            port: resolve_serial(os, probe, prompt, ui)?,
        },
        ConnectionKind::Bluetooth => Connection::Bluetooth {
            device: ask_endpoint(prompt, "Enter Meshtastic BLE device ID (e.g., short_1234)")?,
        },
        ConnectionKind::Tcp => Connection::Tcp {
            endpoint: ask_endpoint(prompt, "Enter TCP address:port (e.g., 127.0.0.1:4403)")?,
        },
        ConnectionKind::Skip => return Ok(None),
    };
    debug!(?connection, "endpoint resolved");
    Ok(Some(connection))
}

/// Manual endpoint entry. Blank answers are asked again.
fn ask_endpoint(prompt: &mut dyn Prompter, question: &str) -> Result<String, InstallerError> {
    loop {
        let value = prompt.ask_text(question, false)?;
        let value = value.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
        debug!(question, "blank endpoint, asking again");
    }
}

fn resolve_serial(
    os: OsKind,
    probe: &dyn CapabilityProbe,
    prompt: &mut dyn Prompter,
    ui: &dyn Reporter,
) -> Result<String, InstallerError> {
    ui.info("Scanning for serial devices…");
    let discovery = probe.discover_endpoints(os);
    if let Some(warning) = &discovery.warning {
        ui.warning(warning);
    }

    let ports = discovery.endpoints;
    if ports.is_empty() {
        ui.warning("No serial devices detected");
        return ask_endpoint(prompt, "Enter serial port path (e.g., /dev/ttyUSB0)");
    }

    ui.success(&format!("Found {} serial device(s)", ports.len()));
    let mut options = ports.clone();
    options.push("Enter manually".to_string());

    let idx = prompt.ask_choice("Select serial port:", &options, 0)?;
    match ports.get(idx) {
        Some(port) => Ok(port.clone()),
        None => ask_endpoint(prompt, "Enter serial port path"),
    }
}

/// Shows the presets and reads a code; anything unrecognised means the default.
pub fn choose_speed(
    prompt: &mut dyn Prompter,
    ui: &dyn Reporter,
) -> Result<DataSpeed, InstallerError> {
    let codes: Vec<String> = DataSpeed::ALL.iter().map(|s| s.code().to_string()).collect();
    let rows: Vec<(&str, &str)> = DataSpeed::ALL
        .iter()
        .zip(&codes)
        .map(|(s, code)| (code.as_str(), s.description()))
        .collect();

    ui.line("");
    ui.kv_box("LoRa speed settings", &rows);

    let raw = prompt.ask_text(
        &format!("Enter speed setting [0-8] (default: {})", DataSpeed::default()),
        true,
    )?;
    let speed = DataSpeed::parse_or_default(&raw);
    if !raw.is_empty() && speed.to_string() != raw.trim() {
        ui.warning(&format!(
            "'{}' is not a supported preset, using {} ({})",
            raw,
            speed,
            speed.preset_name()
        ));
    }
    info!(speed = speed.code(), "speed chosen");
    Ok(speed)
}
