//! Command actions: "confirm, then POST, then await result".
//!
//! An [`Action`] resolves synchronously to either a request to post or a
//! declined prompt. Confirmation is a decorator composed when the button is
//! created ([`with_confirmation`]). Resolution happens while the dashboard
//! is locked; [`trigger`] then POSTs whatever was resolved after the lock
//! is released, so every button shares one send path.

use dex_domain::command::{CommandReply, CommandRequest, INSTRUMENT};
use dex_domain::error::{DexError, NotFoundError, ValidationError};
use dex_domain::name::validate_identifier;

use crate::ports::CommandPoster;

/// Prompt used by buttons that do not need a specific warning.
pub const GENERIC_CONFIRMATION: &str = "Are you sure?";

/// A synchronous yes/no guard.
pub trait Confirm: Sync {
    /// Ask the user `prompt`; `true` means go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

/// A pre-answered guard (e.g. the `confirmed` field of a submitted form).
impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

/// What an action decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Send this request.
    Post(CommandRequest),
    /// The guard said no; nothing is sent.
    Declined { prompt: String },
}

/// Something a command button does when pressed.
pub trait Action: Send + Sync {
    fn resolve(&self, guard: &dyn Confirm) -> Resolution;
}

/// Post a fixed request unconditionally.
#[derive(Debug, Clone)]
pub struct PostCommand {
    request: CommandRequest,
}

impl PostCommand {
    #[must_use]
    pub fn new(request: CommandRequest) -> Self {
        Self { request }
    }
}

impl Action for PostCommand {
    fn resolve(&self, _guard: &dyn Confirm) -> Resolution {
        Resolution::Post(self.request.clone())
    }
}

/// An action that only runs after its guard accepts `message`.
#[derive(Debug, Clone)]
pub struct Confirmed<A> {
    inner: A,
    message: String,
}

impl<A> Confirmed<A> {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<A: Action> Action for Confirmed<A> {
    fn resolve(&self, guard: &dyn Confirm) -> Resolution {
        if guard.confirm(&self.message) {
            self.inner.resolve(guard)
        } else {
            Resolution::Declined {
                prompt: self.message.clone(),
            }
        }
    }
}

/// Wrap `action` so it asks `message` before doing anything.
#[must_use]
pub fn with_confirmation<A: Action>(action: A, message: impl Into<String>) -> Confirmed<A> {
    Confirmed {
        inner: action,
        message: message.into(),
    }
}

/// Build the confirmation-gated action that sends `raw` to an instrument.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyInstrumentCommand`] when `raw` is blank,
/// or a name validation error for `device`. A non-blank `raw` is sent as typed.
pub fn instrument_send(device: &str, raw: &str) -> Result<Confirmed<PostCommand>, DexError> {
    validate_identifier(device)?;
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyInstrumentCommand.into());
    }
    let request = CommandRequest::new(INSTRUMENT, "send")?
        .arg(device)
        .arg(raw);
    Ok(with_confirmation(
        PostCommand::new(request),
        GENERIC_CONFIRMATION,
    ))
}

/// Final outcome of pressing a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Sent(CommandReply),
    Declined { prompt: String },
}

/// POST a single request, logging the attempt and any failure.
///
/// # Errors
///
/// Propagates the poster's [`DexError::Command`] unchanged; there is no retry.
pub async fn post<P: CommandPoster>(
    poster: &P,
    request: CommandRequest,
) -> Result<CommandReply, DexError> {
    tracing::info!(%request, "posting command");
    match poster.post(request.clone()).await {
        Ok(reply) => Ok(reply),
        Err(err) => {
            tracing::error!(%request, error = %err, "command failed");
            Err(err)
        }
    }
}

/// POST an accepted resolution; a declined one is passed through untouched.
///
/// # Errors
///
/// Returns the poster's error when the request fails. A declined prompt is
/// not an error.
pub async fn trigger<P: CommandPoster>(
    poster: &P,
    resolution: Resolution,
) -> Result<ActionOutcome, DexError> {
    match resolution {
        Resolution::Declined { prompt } => {
            tracing::debug!(%prompt, "command declined");
            Ok(ActionOutcome::Declined { prompt })
        }
        Resolution::Post(request) => post(poster, request).await.map(ActionOutcome::Sent),
    }
}

/// A labelled, identifiable action shown as a button.
pub struct CommandButton {
    pub id: String,
    pub label: String,
    pub action: Box<dyn Action>,
}

impl std::fmt::Debug for CommandButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Ordered set of command buttons with unique ids.
#[derive(Debug, Default)]
pub struct CommandPanel {
    buttons: Vec<CommandButton>,
}

impl CommandPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a button.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `id` is not an identifier or is already used.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        action: impl Action + 'static,
    ) -> Result<(), DexError> {
        let id = id.into();
        validate_identifier(&id)?;
        if self.get(&id).is_some() {
            return Err(ValidationError::DuplicateCommand(id).into());
        }
        self.buttons.push(CommandButton {
            id,
            label: label.into(),
            action: Box::new(action),
        });
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CommandButton> {
        self.buttons.iter().find(|button| button.id == id)
    }

    /// Resolve the button `id` against `guard`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotFound`] for an unknown id.
    pub fn resolve(&self, id: &str, guard: &dyn Confirm) -> Result<Resolution, DexError> {
        let button = self.get(id).ok_or_else(|| NotFoundError {
            entity: "Command",
            id: id.to_string(),
        })?;
        Ok(button.action.resolve(guard))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandButton> {
        self.buttons.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
