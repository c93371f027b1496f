//! CPT6100 pressure transducer: four ports, each reported as its own source.
//!
//! Unlike the other sensor widgets the table is fixed: one row per port,
//! created at mount time, with the value and age cells updated in place.

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::snapshot::{Snapshot, display_value};
use dex_domain::view::{Element, Tag};
use dex_domain::widget::WidgetDescriptor;

pub const NAME: &str = "sens_cpt6100";
pub const PORTS: usize = 4;

/// Source key of port `port`.
#[must_use]
pub fn source(port: usize) -> String {
    format!("cpt6100_port{port}")
}

/// Age label of port `port`.
#[must_use]
pub fn age_label(port: usize) -> String {
    format!("cpt6100_port{port}_age")
}

fn value_id(port: usize) -> String {
    format!("cpt6100_port{port}_val")
}

pub struct Cpt6100Widget {
    descriptor: WidgetDescriptor,
}

impl Cpt6100Widget {
    /// # Errors
    ///
    /// Only fails if the fixed descriptor were invalid.
    pub fn new() -> Result<Self, DexError> {
        Ok(Self {
            descriptor: crate::descriptor(NAME, "CPT6100")?,
        })
    }
}

impl Widget for Cpt6100Widget {
    fn descriptor(&self) -> &WidgetDescriptor {
        &self.descriptor
    }

    fn mount(&self) -> Element {
        let header = Element::row(Tag::Th, ["Port", "Pressure", "Age"]);
        let table = (0..PORTS).fold(
            Element::new(Tag::Table).with_id("cpt6100").child(header),
            |table, port| {
                table.child(
                    Element::new(Tag::Tr)
                        .child(Element::new(Tag::Td).with_text(port.to_string()))
                        .child(Element::new(Tag::Td).child(Element::span().with_id(value_id(port)).with_text("?")))
                        .child(Element::new(Tag::Td).child(
                            Element::span()
                                .with_id(age_label(port))
                                .with_age(age_label(port))
                                .with_class("small")
                                .with_text("?"),
                        )),
                )
            },
        );
        Element::div().with_class("widget").child(table)
    }

    fn tracked_ages(&self) -> Vec<String> {
        (0..PORTS).map(age_label).collect()
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        // A malformed port must not hide the others; the first error is returned.
        let mut first_error = None;
        for port in 0..PORTS {
            let record = match snapshot.source(&source(port)) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(err) => {
                    first_error.get_or_insert(err);
                    continue;
                }
            };
            let pressure = record.field("pressure").map_or_else(String::new, display_value);
            cx.view.set_text(&value_id(port), pressure)?;
            cx.ages.touch(&age_label(port), record.age_s())?;
        }
        first_error.map_or(Ok(()), |err| Err(err.into()))
    }
}
