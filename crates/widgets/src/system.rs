//! System command buttons: reboot and power down the station computer.

use dex_app::command::{GENERIC_CONFIRMATION, PostCommand, with_confirmation};
use dex_app::dashboard::Dashboard;
use dex_domain::command::{CommandRequest, SYS_CONTROL};
use dex_domain::error::DexError;

pub const POWEROFF_WARNING: &str = "WARNING: Are you sure you want to power down?";

/// Add "System Reboot" and "System Shutdown" to `dashboard`.
///
/// Reboot asks the generic question, shutdown asks its own warning instead.
///
/// # Errors
///
/// Returns a validation error if either button id is already taken.
pub fn install_system_buttons(dashboard: &mut Dashboard) -> Result<(), DexError> {
    let reboot = CommandRequest::new(SYS_CONTROL, "reboot")?;
    dashboard.add_button(
        "reboot",
        "System Reboot",
        with_confirmation(PostCommand::new(reboot), GENERIC_CONFIRMATION),
    )?;

    let poweroff = CommandRequest::new(SYS_CONTROL, "poweroff")?;
    dashboard.add_button(
        "poweroff",
        "System Shutdown",
        with_confirmation(PostCommand::new(poweroff), POWEROFF_WARNING),
    )?;
    Ok(())
}
