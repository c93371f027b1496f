//! Instrument console: the recent command log of a serially attached device.
//!
//! The source for device `<device>` carries `cmdlog: [line, …]`. Raw commands
//! are sent through [`Dashboard::resolve_instrument`], which the console's
//! form posts to.
//!
//! [`Dashboard::resolve_instrument`]: dex_app::dashboard::Dashboard::resolve_instrument

use dex_app::dispatcher::HandlerContext;
use dex_app::widget::Widget;
use dex_domain::error::DexError;
use dex_domain::name::validate_identifier;
use dex_domain::snapshot::Snapshot;
use dex_domain::view::{Element, Tag};
use dex_domain::widget::WidgetDescriptor;

pub struct InstrumentConsole {
    descriptor: WidgetDescriptor,
    device: String,
    log_id: String,
    age_label: String,
}

impl InstrumentConsole {
    /// Console for `device`, named `instr_<device>`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `device` is not an identifier.
    pub fn new(device: &str) -> Result<Self, DexError> {
        validate_identifier(device)?;
        Ok(Self {
            descriptor: crate::descriptor(&format!("instr_{device}"), device)?,
            device: device.to_string(),
            log_id: format!("{device}_cmdlog"),
            age_label: format!("{device}_age"),
        })
    }
}

impl Widget for InstrumentConsole {
    fn descriptor(&self) -> &WidgetDescriptor {
        &self.descriptor
    }

    fn mount(&self) -> Element {
        Element::div()
            .with_class("widget instrument")
            .child(Element::new(Tag::Pre).with_id(&self.log_id))
            .child(crate::age_footer(&self.age_label))
    }

    fn tracked_ages(&self) -> Vec<String> {
        vec![self.age_label.clone()]
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        let Some(record) = snapshot.source(&self.device)? else {
            return Ok(());
        };
        let lines: Vec<String> = record.decode_field(&self.device, "cmdlog")?.unwrap_or_default();
        cx.view.replace_children(
            &self.log_id,
            lines.into_iter().map(|line| Element::div().with_text(line)),
        )?;
        cx.ages.touch(&self.age_label, record.age_s())?;
        Ok(())
    }
}
