//! Service-control form: batched start/stop/status over a fixed service list.
//!
//! Every service has one exclusive choice, `none` by default. Draining the
//! form yields one `sys_control service [name, choice]` request per service
//! whose choice is not `none`, in list order, and resets those choices to
//! `none`. The requests are posted with [`submit_batch`].

use dex_domain::command::{CommandReply, CommandRequest, ServiceCommand};
use dex_domain::error::{DexError, ValidationError};
use dex_domain::name::ServiceName;

use crate::command::post;
use crate::ports::CommandPoster;

/// Per-service choices for the service-control form.
#[derive(Debug, Clone, Default)]
pub struct ServiceControlForm {
    choices: Vec<(ServiceName, ServiceCommand)>,
}

impl ServiceControlForm {
    /// Create a form over `services`, every choice set to `none`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateService`] when a service is listed twice.
    pub fn new(services: impl IntoIterator<Item = ServiceName>) -> Result<Self, DexError> {
        let mut choices: Vec<(ServiceName, ServiceCommand)> = Vec::new();
        for service in services {
            if choices.iter().any(|(known, _)| known == &service) {
                return Err(ValidationError::DuplicateService(service.to_string()).into());
            }
            choices.push((service, ServiceCommand::None));
        }
        Ok(Self { choices })
    }

    /// Services and their current choice, in list order.
    pub fn choices(&self) -> impl Iterator<Item = (&ServiceName, ServiceCommand)> {
        self.choices.iter().map(|(service, choice)| (service, *choice))
    }

    #[must_use]
    pub fn choice(&self, service: &str) -> Option<ServiceCommand> {
        self.choices
            .iter()
            .find(|(known, _)| known.as_str() == service)
            .map(|(_, choice)| *choice)
    }

    /// Set the choice for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownService`] when `service` is not in the list.
    pub fn select(&mut self, service: &str, command: ServiceCommand) -> Result<(), ValidationError> {
        let slot = self
            .choices
            .iter_mut()
            .find(|(known, _)| known.as_str() == service)
            .ok_or_else(|| ValidationError::UnknownService(service.to_string()))?;
        slot.1 = command;
        Ok(())
    }

    /// Build one request per non-`none` choice and reset those choices.
    pub fn drain_requests(&mut self) -> Vec<CommandRequest> {
        let mut requests = Vec::new();
        for (service, choice) in &mut self.choices {
            if choice.is_none() {
                continue;
            }
            requests.push(CommandRequest::service(service, *choice));
            *choice = ServiceCommand::None;
        }
        requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Result of posting a batch of requests.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub sent: Vec<(CommandRequest, CommandReply)>,
    pub failed: Vec<(CommandRequest, DexError)>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// POST `requests` one after another; a failure does not stop the rest.
pub async fn submit_batch<P: CommandPoster>(
    poster: &P,
    requests: Vec<CommandRequest>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for request in requests {
        match post(poster, request.clone()).await {
            Ok(reply) => outcome.sent.push((request, reply)),
            Err(err) => outcome.failed.push((request, err)),
        }
    }
    outcome
}
