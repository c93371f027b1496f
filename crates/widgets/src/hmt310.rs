//! HMT310 humidity and temperature sensor.
//!
//! The source carries `data: [[name, value, unit], …]`. Every snapshot
//! rebuilds the table from scratch, so the row count always equals the
//! number of readings in the latest data.

use serde::Deserialize;
use serde_json::Value;

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::snapshot::{Snapshot, display_value};
use dex_domain::view::{Element, Tag};
use dex_domain::widget::WidgetDescriptor;

pub const NAME: &str = "sens_hmt310";
pub const SOURCE: &str = "hmt310";
pub const AGE_LABEL: &str = "hmt310_age";

const TABLE: &str = "hmt310_data";

/// One `[name, value, unit]` triple.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading(pub String, pub Value, pub String);

pub struct Hmt310Widget {
    descriptor: WidgetDescriptor,
}

impl Hmt310Widget {
    /// # Errors
    ///
    /// Only fails if the fixed descriptor were invalid.
    pub fn new() -> Result<Self, DexError> {
        Ok(Self {
            descriptor: crate::descriptor(NAME, "HMT310")?,
        })
    }
}

impl Widget for Hmt310Widget {
    fn descriptor(&self) -> &WidgetDescriptor {
        &self.descriptor
    }

    fn mount(&self) -> Element {
        Element::div()
            .with_class("widget")
            .child(Element::new(Tag::Table).with_id(TABLE))
            .child(crate::age_footer(AGE_LABEL))
    }

    fn tracked_ages(&self) -> Vec<String> {
        vec![AGE_LABEL.to_string()]
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        let Some(record) = snapshot.source(SOURCE)? else {
            return Ok(());
        };
        let readings: Vec<Reading> = record.decode_field(SOURCE, "data")?.unwrap_or_default();

        let rows = readings.iter().map(|Reading(name, value, unit)| {
            Element::row(Tag::Td, [name.clone(), display_value(value), unit.clone()])
        });
        cx.view.replace_children(TABLE, rows)?;
        cx.ages.touch(AGE_LABEL, record.age_s())?;
        Ok(())
    }
}
