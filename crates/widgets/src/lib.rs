//! # dex-widgets
//!
//! The station's dashboard widgets, each implementing [`dex_app::widget::Widget`].
//!
//! ## Provided widgets
//!
//! | Widget | Name | Source key(s) | Age label(s) |
//! |--------|------|---------------|--------------|
//! | Overview | `overview` | `hmt310` | none |
//! | HMT310 | `sens_hmt310` | `hmt310` | `hmt310_age` |
//! | Novatel | `sens_novatel` | `novatel` | `novatel_age` |
//! | CPT6100 | `sens_cpt6100` | `cpt6100_port0` … `cpt6100_port3` | `cpt6100_port{i}_age` |
//! | USB-1608FS-Plus | `sens_usb1608fsplus` | `usb1608fsplus` | `usb1608fsplus_age` |
//! | Instrument console | `instr_<device>` | `<device>` | `<device>_age` |
//!
//! [`system::install_system_buttons`] adds the reboot and shutdown buttons.
//!
//! ## Dependency rule
//!
//! Depends on `dex-app` and `dex-domain` only.

pub mod cpt6100;
pub mod hmt310;
pub mod instrument;
pub mod novatel;
pub mod overview;
pub mod system;
pub mod usb1608fsplus;

use dex_app::dashboard::Dashboard;
use dex_app::widget::Widget;
use dex_domain::error::{DexError, NotFoundError};
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

pub use cpt6100::Cpt6100Widget;
pub use hmt310::Hmt310Widget;
pub use instrument::InstrumentConsole;
pub use novatel::NovatelWidget;
pub use overview::OverviewWidget;
pub use usb1608fsplus::Usb1608FsPlusWidget;

/// Widget names installed when configuration does not list any, in display order.
pub const DEFAULT_WIDGETS: [&str; 5] = [
    overview::NAME,
    hmt310::NAME,
    novatel::NAME,
    cpt6100::NAME,
    usb1608fsplus::NAME,
];

/// Build the station widget called `name`.
///
/// # Errors
///
/// Returns [`DexError::NotFound`] for a name that is not a station widget.
pub fn by_name(name: &str) -> Result<Box<dyn Widget>, DexError> {
    let widget: Box<dyn Widget> = match name {
        overview::NAME => Box::new(OverviewWidget::new()?),
        hmt310::NAME => Box::new(Hmt310Widget::new()?),
        novatel::NAME => Box::new(NovatelWidget::new()?),
        cpt6100::NAME => Box::new(Cpt6100Widget::new()?),
        usb1608fsplus::NAME => Box::new(Usb1608FsPlusWidget::new()?),
        _ => {
            return Err(NotFoundError {
                entity: "Widget",
                id: name.to_string(),
            }
            .into());
        }
    };
    Ok(widget)
}

/// Install an instrument console for `device` and allow raw commands to it.
///
/// # Errors
///
/// Returns a validation error for a malformed device name or one that is
/// already installed.
pub fn install_instrument(dashboard: &mut Dashboard, device: &str) -> Result<(), DexError> {
    dashboard.install(InstrumentConsole::new(device)?)?;
    dashboard.add_instrument(device)
}

fn descriptor(name: &str, title: &str) -> Result<WidgetDescriptor, DexError> {
    WidgetDescriptor::builder().name(name).title(title).build()
}

/// Local id of the age span inside a widget with a single age.
pub const AGE_ID: &str = "age";

/// The "Data Age: ?" footer most sensor widgets carry.
fn age_footer(label: &str) -> Element {
    Element::div()
        .with_class("small")
        .with_text("Data Age: ")
        .child(Element::span().with_id(AGE_ID).with_age(label).with_text("?"))
}
