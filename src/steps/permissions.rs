use crate::{steps::StepResult, system::System, ui::Reporter};

/// Group that owns USB serial device nodes on Debian-family systems.
pub const SERIAL_GROUP: &str = "dialout";

/// Grants the invoking user access to serial devices. Linux only.
pub fn configure(system: &dyn System, user: Option<&str>, ui: &dyn Reporter) -> StepResult {
    ui.info("Configuring serial port permissions…");

    let Some(user) = user else {
        return StepResult::failed(
            format!("Adding user to the {} group", SERIAL_GROUP),
            "could not determine the current user name",
        );
    };

    let result = system.add_user_to_group(user, SERIAL_GROUP);
    if result.success {
        ui.success(&result.description);
        ui.warning("You need to log out and log back in for permission changes to take effect");
    }
    result
}
