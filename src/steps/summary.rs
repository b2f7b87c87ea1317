use console::style;

use crate::{
    config::{Connection, InstallationChoice},
    orchestrator::RunReport,
    ui::Reporter,
};

fn command(cmd: &str, note: &str) -> String {
    if note.is_empty() {
        format!("   {}", style(cmd).cyan())
    } else {
        format!("   {}  # {}", style(cmd).cyan(), note)
    }
}

fn heading(n: usize, text: &str) -> String {
    format!("\n{}. {}", n, style(text).bold())
}

/// Prints the closing next-steps summary.
pub fn print(report: &RunReport, ui: &dyn Reporter) {
    ui.header("Installation Complete!");

    if !report.failures.is_empty() {
        ui.line("");
        ui.warning("Some steps did not succeed:");
        for failure in &report.failures {
            ui.error(&failure.to_string());
        }
    }

    if report.config_incomplete {
        ui.warning("The Reticulum configuration was not written — setup is incomplete.");
    }

    ui.line(&format!("\n{}", style("Next Steps:").bold().green()));

    let mut n = 1;
    ui.line(&heading(n, "Test your setup:"));
    ui.line(&command("rnsd", "Start RNS daemon"));
    ui.line(&command("rnstatus", "Check interface status"));

    let connection = report.choice.as_ref().and_then(InstallationChoice::connection);
    if let Some(Connection::Serial { .. }) = connection {
        n += 1;
        ui.line(&heading(n, "Configure your Meshtastic device:"));
        ui.line(&command("meshtastic --info", ""));
        ui.line(&command("meshtastic --set lora.region US", ""));
        ui.line(&command("meshtastic --set lora.modem_preset SHORT_FAST", ""));
    }

    n += 1;
    ui.line(&heading(n, "Try RNS applications:"));
    ui.line(&command("nomadnet", "Launch NomadNet"));
    ui.line(&command("rncp file.txt <hash>:remote.txt", "Transfer files"));

    ui.line(&format!("\n{}", style("Documentation:").bold()));
    ui.line("   • Setup Guide: RNS_Meshtastic_Setup_Guide.md");
    ui.line("   • README: README.md");
    ui.line("   • RNS Manual: https://reticulum.network/manual/");

    if report.relogin_required {
        ui.line("");
        ui.warning("Remember to log out and log back in for serial port permissions!");
    }

    ui.line(&format!("\n{}\n", style("Happy meshing!").green()));
}
