//! Novatel GNSS receiver: shows the latest raw log record.

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::snapshot::{Snapshot, display_value};
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

pub const NAME: &str = "sens_novatel";
pub const SOURCE: &str = "novatel";
pub const AGE_LABEL: &str = "novatel_age";

const VALUE: &str = "novatel_value";

pub struct NovatelWidget {
    descriptor: WidgetDescriptor,
}

impl NovatelWidget {
    /// # Errors
    ///
    /// Only fails if the fixed descriptor were invalid.
    pub fn new() -> Result<Self, DexError> {
        Ok(Self {
            descriptor: crate::descriptor(NAME, "Novatel")?,
        })
    }
}

impl Widget for NovatelWidget {
    fn descriptor(&self) -> &WidgetDescriptor {
        &self.descriptor
    }

    fn mount(&self) -> Element {
        Element::div()
            .with_class("widget")
            .child(Element::div().child(Element::span().with_id(VALUE).with_class("strong").with_text("?")))
            .child(crate::age_footer(AGE_LABEL))
    }

    fn tracked_ages(&self) -> Vec<String> {
        vec![AGE_LABEL.to_string()]
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        let Some(record) = snapshot.source(SOURCE)? else {
            return Ok(());
        };
        let text = record.field("record").map_or_else(String::new, display_value);
        cx.view.set_text(VALUE, text)?;
        cx.ages.touch(AGE_LABEL, record.age_s())?;
        Ok(())
    }
}
