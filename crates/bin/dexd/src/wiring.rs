//! Build the dashboard described by [`DashboardConfig`].

use dex_app::dashboard::Dashboard;
use dex_app::service_control::ServiceControlForm;
use dex_domain::error::DexError;
use dex_domain::name::ServiceName;

use crate::config::DashboardConfig;

/// Install the configured widgets, instrument consoles and command surfaces.
///
/// # Errors
///
/// Returns an error for an unknown widget name, a malformed or duplicated
/// service or instrument, or a widget listed twice.
pub fn build_dashboard(config: &DashboardConfig) -> Result<Dashboard, DexError> {
    let services = config
        .services
        .iter()
        .map(ServiceName::new)
        .collect::<Result<Vec<_>, _>>()?;
    let mut dashboard = Dashboard::new().with_services(ServiceControlForm::new(services)?);

    for name in &config.widgets {
        dashboard.install(dex_widgets::by_name(name)?)?;
    }
    for device in &config.instruments {
        dex_widgets::install_instrument(&mut dashboard, device)?;
    }
    if config.system_buttons {
        dex_widgets::system::install_system_buttons(&mut dashboard)?;
    }

    tracing::info!(
        widgets = dashboard.registry().len(),
        services = dashboard.services().len(),
        instruments = dashboard.instruments().len(),
        "dashboard assembled"
    );
    Ok(dashboard)
}
