//! USB-1608FS-Plus DAQ: eight analog channels, raw sample and voltage.

use serde::Deserialize;
use serde_json::Value;

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::snapshot::{Snapshot, display_value};
use dex_domain::view::{Element, Tag};
use dex_domain::widget::WidgetDescriptor;

pub const NAME: &str = "sens_usb1608fsplus";
pub const SOURCE: &str = "usb1608fsplus";
pub const AGE_LABEL: &str = "usb1608fsplus_age";
pub const CHANNELS: usize = 8;

const TABLE: &str = "usb1608fsplus_data";

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    samp: Value,
    #[serde(default)]
    volt: Value,
}

pub struct Usb1608FsPlusWidget {
    descriptor: WidgetDescriptor,
}

impl Usb1608FsPlusWidget {
    /// # Errors
    ///
    /// Only fails if the fixed descriptor were invalid.
    pub fn new() -> Result<Self, DexError> {
        Ok(Self {
            descriptor: crate::descriptor(NAME, "USB-1608FS-Plus")?,
        })
    }
}

impl Widget for Usb1608FsPlusWidget {
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

        let mut rows = Vec::with_capacity(CHANNELS);
        for chan in 0..CHANNELS {
            let channel: Option<Channel> = record.decode_field(SOURCE, &format!("chan_{chan}"))?;
            if let Some(channel) = channel {
                rows.push(Element::row(
                    Tag::Td,
                    [
                        format!("Chan {chan}"),
                        display_value(&channel.samp),
                        display_value(&channel.volt),
                    ],
                ));
            }
        }
        cx.view.replace_children(TABLE, rows)?;
        cx.ages.touch(AGE_LABEL, record.age_s())?;
        Ok(())
    }
}
