//! Dashboard controller: owns every piece of dashboard state.
//!
//! Constructed once at startup and handed to the driving adapter. All
//! mutation goes through `&mut self`, so snapshots are processed one at a
//! time and to completion. Command actions resolve synchronously here.
//!
//! [`SharedDashboard`] is the handle driving adapters hold: it resolves
//! commands while locked and POSTs them once the lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dex_domain::command::{CommandRequest, ServiceCommand};
use dex_domain::error::{DexError, NotFoundError, ValidationError};
use dex_domain::name::validate_identifier;
use dex_domain::snapshot::Snapshot;

use crate::age_tracker::AgeTracker;
use crate::command::{
    Action, ActionOutcome, CommandButton, CommandPanel, Confirm, Resolution, instrument_send,
    trigger,
};
use crate::dispatcher::{DataDispatcher, DispatchReport};
use crate::ports::CommandPoster;
use crate::registry::{RegisteredWidget, WidgetRegistry};
use crate::service_control::{BatchOutcome, ServiceControlForm, submit_batch};
use crate::widget::{Widget, WidgetHandler};

/// The widget registry, dispatcher, age tracker and command surfaces of one dashboard.
#[derive(Default)]
pub struct Dashboard {
    registry: WidgetRegistry,
    dispatcher: DataDispatcher,
    ages: AgeTracker,
    commands: CommandPanel,
    services: ServiceControlForm,
    instruments: Vec<String>,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `services` as the service-control form.
    #[must_use]
    pub fn with_services(mut self, services: ServiceControlForm) -> Self {
        self.services = services;
        self
    }

    /// Register a widget, mount its view, declare its ages and hook its handler.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateWidget`] if a widget with the same
    /// name is already installed; nothing is changed in that case.
    pub fn install<W: Widget + 'static>(&mut self, widget: W) -> Result<(), DexError> {
        let descriptor = widget.descriptor().clone();
        let name = descriptor.name.clone();
        self.registry.register(descriptor, widget.mount())?;
        for label in widget.tracked_ages() {
            if !self.ages.track(label.clone()) {
                tracing::warn!(widget = %name, label, "age label is shared with another widget");
            }
        }
        tracing::debug!(widget = %name, "installed widget");
        self.dispatcher
            .on_snapshot(name, Box::new(WidgetHandler(widget)));
        Ok(())
    }

    /// Add a command button.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed or duplicate id.
    pub fn add_button(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        action: impl Action + 'static,
    ) -> Result<(), DexError> {
        self.commands.add(id, label, action)
    }

    /// Allow raw commands to be sent to `device`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed or duplicate device name.
    pub fn add_instrument(&mut self, device: impl Into<String>) -> Result<(), DexError> {
        let device = device.into();
        validate_identifier(&device)?;
        if self.instruments.contains(&device) {
            return Err(ValidationError::DuplicateInstrument(device).into());
        }
        self.instruments.push(device);
        Ok(())
    }

    /// Feed a snapshot to every widget.
    pub fn dispatch(&mut self, snapshot: &Snapshot) -> DispatchReport {
        self.dispatcher
            .dispatch(snapshot, &mut self.registry, &mut self.ages)
    }

    /// Installed widgets in registration order.
    pub fn widgets(&self) -> impl Iterator<Item = &RegisteredWidget> {
        self.registry.iter()
    }

    #[must_use]
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ages(&self) -> &AgeTracker {
        &self.ages
    }

    pub fn buttons(&self) -> impl Iterator<Item = &CommandButton> {
        self.commands.iter()
    }

    #[must_use]
    pub fn services(&self) -> &ServiceControlForm {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceControlForm {
        &mut self.services
    }

    #[must_use]
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Resolve the command button `id` against `guard`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotFound`] for an unknown button.
    pub fn resolve_button(&self, id: &str, guard: &dyn Confirm) -> Result<Resolution, DexError> {
        self.commands.resolve(id, guard)
    }

    /// Resolve a raw command for instrument `device` against `guard`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotFound`] for a device that was not added, or a
    /// validation error for a blank command.
    pub fn resolve_instrument(
        &self,
        device: &str,
        raw: &str,
        guard: &dyn Confirm,
    ) -> Result<Resolution, DexError> {
        if !self.instruments.iter().any(|known| known == device) {
            return Err(NotFoundError {
                entity: "Instrument",
                id: device.to_string(),
            }
            .into());
        }
        Ok(instrument_send(device, raw)?.resolve(guard))
    }

    /// Apply service `choices` and drain the resulting requests.
    ///
    /// Every service is checked before any choice is applied, so an unknown
    /// name leaves the form untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownService`] for a service not in the form.
    pub fn queue_services(
        &mut self,
        choices: &[(String, ServiceCommand)],
    ) -> Result<Vec<CommandRequest>, DexError> {
        if let Some((unknown, _)) = choices
            .iter()
            .find(|(service, _)| self.services.choice(service).is_none())
        {
            return Err(ValidationError::UnknownService(unknown.clone()).into());
        }
        for (service, choice) in choices {
            self.services.select(service, *choice)?;
        }
        Ok(self.services.drain_requests())
    }
}

/// A [`Dashboard`] shared between request handlers.
///
/// The lock is only held to read or resolve; requests are posted after it
/// is released.
#[derive(Clone, Default)]
pub struct SharedDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl SharedDashboard {
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Lock the dashboard.
    ///
    /// Widget handlers are isolated by the dispatcher, so a poisoned lock
    /// still guards consistent state and is recovered.
    pub fn lock(&self) -> MutexGuard<'_, Dashboard> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with<T>(&self, f: impl FnOnce(&mut Dashboard) -> T) -> T {
        f(&mut *self.lock())
    }

    /// Press the command button `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotFound`] for an unknown button, or the poster's
    /// error when the request fails.
    pub async fn press_button<P: CommandPoster + Sync>(
        &self,
        poster: &P,
        id: &str,
        guard: &dyn Confirm,
    ) -> Result<ActionOutcome, DexError> {
        let resolution = self.with(|dashboard| dashboard.resolve_button(id, guard))?;
        trigger(poster, resolution).await
    }

    /// Send `raw` to the instrument `device`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotFound`] for an unknown device, a validation
    /// error for blank text, or the poster's error when the request fails.
    pub async fn send_to_instrument<P: CommandPoster + Sync>(
        &self,
        poster: &P,
        device: &str,
        raw: &str,
        guard: &dyn Confirm,
    ) -> Result<ActionOutcome, DexError> {
        let resolution = self.with(|dashboard| dashboard.resolve_instrument(device, raw, guard))?;
        trigger(poster, resolution).await
    }

    /// Apply service `choices` and POST the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownService`] before anything is sent.
    /// Failed requests are reported in the [`BatchOutcome`] instead.
    pub async fn submit_services<P: CommandPoster + Sync>(
        &self,
        poster: &P,
        choices: &[(String, ServiceCommand)],
    ) -> Result<BatchOutcome, DexError> {
        let requests = self.with(|dashboard| dashboard.queue_services(choices))?;
        Ok(submit_batch(poster, requests).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{PostCommand, with_confirmation};
    use crate::dispatcher::HandlerContext;
    use dex_domain::command::{CommandReply, SYS_CONTROL};
    use dex_domain::error::CommandError;
    use dex_domain::name::ServiceName;
    use dex_domain::snapshot::SourceRecord;
    use dex_domain::view::Element;
    use dex_domain::widget::WidgetDescriptor;

    /// Shows `record` of source `key` and tracks `<key>_age`.
    struct TextWidget {
        descriptor: WidgetDescriptor,
        key: &'static str,
    }

    impl TextWidget {
        fn new(name: &str, key: &'static str) -> Self {
            Self {
                descriptor: WidgetDescriptor::builder()
                    .name(name)
                    .title(key)
                    .build()
                    .unwrap(),
                key,
            }
        }
    }

    impl Widget for TextWidget {
        fn descriptor(&self) -> &WidgetDescriptor {
            &self.descriptor
        }

        fn mount(&self) -> Element {
            Element::div().child(Element::span().with_id(format!("{}_value", self.key)).with_text("?"))
        }

        fn tracked_ages(&self) -> Vec<String> {
            vec![format!("{}_age", self.key)]
        }

        fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
            let Some(record) = snapshot.source(self.key)? else {
                return Ok(());
            };
            let text: String = record.decode_field(self.key, "record")?.unwrap_or_default();
            cx.view.set_text(&format!("{}_value", self.key), text)?;
            cx.ages.touch(&format!("{}_age", self.key), record.age_s())?;
            Ok(())
        }
    }

    #[test]
    fn should_install_widget_and_track_its_ages() {
        let mut dashboard = Dashboard::new();
        dashboard.install(TextWidget::new("sens_novatel", "novatel")).unwrap();

        assert_eq!(dashboard.registry().len(), 1);
        assert!(dashboard.ages().is_tracked("novatel_age"));
    }

    #[test]
    fn should_reject_second_widget_with_same_name() {
        let mut dashboard = Dashboard::new();
        dashboard.install(TextWidget::new("sens_novatel", "novatel")).unwrap();
        let result = dashboard.install(TextWidget::new("sens_novatel", "novatel2"));

        assert!(matches!(
            result,
            Err(DexError::Validation(ValidationError::DuplicateWidget(_)))
        ));
        assert!(!dashboard.ages().is_tracked("novatel2_age"));
    }

    #[test]
    fn should_update_view_and_age_on_dispatch() {
        let mut dashboard = Dashboard::new();
        dashboard.install(TextWidget::new("sens_novatel", "novatel")).unwrap();

        let snapshot = Snapshot::new().with_source(
            "novatel",
            SourceRecord::new().with_age(0.75).with_field("record", "#BESTPOSA"),
        );
        let report = dashboard.dispatch(&snapshot);

        assert!(report.is_clean());
        assert_eq!(dashboard.ages().age_s("novatel_age"), Some(0.75));
        let widget = dashboard.registry().get("sens_novatel").unwrap();
        assert_eq!(
            widget.view.find("novatel_value").unwrap().text.as_deref(),
            Some("#BESTPOSA")
        );
    }

    #[test]
    fn should_isolate_malformed_source_from_other_widgets() {
        let mut dashboard = Dashboard::new();
        dashboard.install(TextWidget::new("sens_a", "a")).unwrap();
        dashboard.install(TextWidget::new("sens_b", "b")).unwrap();

        let snapshot = Snapshot::new()
            .with_source("a", SourceRecord::new().with_field("record", 12))
            .with_source("b", SourceRecord::new().with_age(1.0).with_field("record", "fine"));
        let report = dashboard.dispatch(&snapshot);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].widget, "sens_a");
        assert_eq!(dashboard.ages().age_s("b_age"), Some(1.0));
    }

    #[test]
    fn should_resolve_button_through_its_confirmation() {
        let mut dashboard = Dashboard::new();
        let request = CommandRequest::new(SYS_CONTROL, "poweroff").unwrap();
        dashboard
            .add_button(
                "poweroff",
                "System Shutdown",
                with_confirmation(PostCommand::new(request.clone()), "power down?"),
            )
            .unwrap();

        assert_eq!(
            dashboard.resolve_button("poweroff", &false).unwrap(),
            Resolution::Declined {
                prompt: "power down?".to_string()
            }
        );
        assert_eq!(
            dashboard.resolve_button("poweroff", &true).unwrap(),
            Resolution::Post(request)
        );
    }

    #[test]
    fn should_reject_instrument_that_was_not_added() {
        let dashboard = Dashboard::new();
        assert!(matches!(
            dashboard.resolve_instrument("novatel", "LOG", &true),
            Err(DexError::NotFound(_))
        ));
    }

    #[test]
    fn should_resolve_instrument_command_when_added() {
        let mut dashboard = Dashboard::new();
        dashboard.add_instrument("novatel").unwrap();
        let resolution = dashboard.resolve_instrument("novatel", "LOG", &true).unwrap();
        assert!(matches!(resolution, Resolution::Post(req) if req.args() == ["novatel", "LOG"]));
    }

    #[test]
    fn should_expose_configured_services() {
        let form = ServiceControlForm::new([ServiceName::new("usb1608fsplus_log").unwrap()]).unwrap();
        let dashboard = Dashboard::new().with_services(form);
        assert_eq!(dashboard.services().len(), 1);
    }

    #[derive(Default)]
    struct RecordingPoster {
        sent: Mutex<Vec<CommandRequest>>,
        down: bool,
    }

    impl CommandPoster for RecordingPoster {
        async fn post(&self, request: CommandRequest) -> Result<CommandReply, DexError> {
            self.sent.lock().unwrap().push(request);
            if self.down {
                return Err(CommandError::Transport("connection refused".into()).into());
            }
            Ok(CommandReply::default())
        }
    }

    fn shared() -> SharedDashboard {
        let form = ServiceControlForm::new(
            ["ngserlog_hmt310", "usb1608fsplus_log"].map(|name| ServiceName::new(name).unwrap()),
        )
        .unwrap();
        let mut dashboard = Dashboard::new().with_services(form);
        let request = CommandRequest::new(SYS_CONTROL, "reboot").unwrap();
        dashboard
            .add_button("reboot", "System Reboot", with_confirmation(PostCommand::new(request), "sure?"))
            .unwrap();
        dashboard.add_instrument("novatel").unwrap();
        SharedDashboard::new(dashboard)
    }

    #[tokio::test]
    async fn should_post_pressed_button_once_confirmed() {
        let dashboard = shared();
        let poster = RecordingPoster::default();

        let declined = dashboard.press_button(&poster, "reboot", &false).await.unwrap();
        assert_eq!(
            declined,
            ActionOutcome::Declined {
                prompt: "sure?".to_string()
            }
        );
        assert!(poster.sent.lock().unwrap().is_empty());

        let sent = dashboard.press_button(&poster, "reboot", &true).await.unwrap();
        assert!(matches!(sent, ActionOutcome::Sent(_)));
        assert_eq!(poster.sent.lock().unwrap()[0].command(), "reboot");
    }

    #[tokio::test]
    async fn should_send_instrument_text_through_shared_dashboard() {
        let dashboard = shared();
        let poster = RecordingPoster::default();

        dashboard
            .send_to_instrument(&poster, "novatel", " LOG VERSION ", &true)
            .await
            .unwrap();

        assert_eq!(poster.sent.lock().unwrap()[0].args(), ["novatel", " LOG VERSION "]);
    }

    #[tokio::test]
    async fn should_reset_service_choices_even_when_batch_fails() {
        let dashboard = shared();
        let poster = RecordingPoster {
            down: true,
            ..RecordingPoster::default()
        };
        let choices = [("usb1608fsplus_log".to_string(), ServiceCommand::Stop)];

        let outcome = dashboard.submit_services(&poster, &choices).await.unwrap();

        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(
            dashboard.lock().services().choice("usb1608fsplus_log"),
            Some(ServiceCommand::None)
        );
    }

    #[tokio::test]
    async fn should_leave_form_untouched_when_a_service_is_unknown() {
        let dashboard = shared();
        let poster = RecordingPoster::default();
        let choices = [
            ("ngserlog_hmt310".to_string(), ServiceCommand::Start),
            ("ghost".to_string(), ServiceCommand::Stop),
        ];

        let result = dashboard.submit_services(&poster, &choices).await;

        assert!(matches!(
            result,
            Err(DexError::Validation(ValidationError::UnknownService(name))) if name == "ghost"
        ));
        assert_eq!(
            dashboard.lock().services().choice("ngserlog_hmt310"),
            Some(ServiceCommand::None)
        );
        assert!(poster.sent.lock().unwrap().is_empty());
    }
}
