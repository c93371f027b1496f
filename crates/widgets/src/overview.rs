//! Overview: headline temperature and humidity from the HMT310 sensor.

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::snapshot::{Snapshot, display_value};
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

use crate::hmt310::{self, Reading};

pub const NAME: &str = "overview";

const TEMPERATURE: &str = "ovw_temperature";
const HUMIDITY: &str = "ovw_relhumiditiy";

/// Shows `T` in `'C` and `RH` in `%RH`; readings in other units are ignored.
pub struct OverviewWidget {
    descriptor: WidgetDescriptor,
}

impl OverviewWidget {
    /// # Errors
    ///
    /// Only fails if the fixed descriptor were invalid.
    pub fn new() -> Result<Self, DexError> {
        Ok(Self {
            descriptor: crate::descriptor(NAME, "Overview")?,
        })
    }
}

impl Widget for OverviewWidget {
    fn descriptor(&self) -> &WidgetDescriptor {
        &self.descriptor
    }

    fn mount(&self) -> Element {
        Element::div().with_class("widget overview").child(
            Element::div()
                .with_class("ovw_msg")
                .child(Element::span().with_id(TEMPERATURE).with_text("?"))
                .child(Element::span().with_text(" \u{b0}C  "))
                .child(Element::span().with_id(HUMIDITY).with_text("?"))
                .child(Element::span().with_text(" %RH")),
        )
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        let Some(record) = snapshot.source(hmt310::SOURCE)? else {
            return Ok(());
        };
        let readings: Vec<Reading> = record
            .decode_field(hmt310::SOURCE, "data")?
            .unwrap_or_default();

        for Reading(name, value, unit) in &readings {
            match (name.as_str(), unit.as_str()) {
                ("T", "'C") => cx.view.set_text(TEMPERATURE, display_value(value))?,
                ("RH", "%RH") => cx.view.set_text(HUMIDITY, display_value(value))?,
                _ => {}
            }
        }
        Ok(())
    }
}
