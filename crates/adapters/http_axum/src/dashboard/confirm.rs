//! Confirmation page and the response of a guarded form submission.

use askama::Template;
use axum::response::{Html, IntoResponse, Redirect, Response};

use dex_app::command::ActionOutcome;

/// "Are you sure?" page template.
///
/// Its form re-submits to `/{section}/{target}` with the original fields
/// carried as hidden inputs and `confirmed=true`.
#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmTemplate {
    prompt: String,
    section: &'static str,
    target: String,
    fields: Vec<HiddenField>,
}

impl IntoResponse for ConfirmTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

pub struct HiddenField {
    name: &'static str,
    value: String,
}

impl ConfirmTemplate {
    #[must_use]
    pub fn new(prompt: String, section: &'static str, target: impl Into<String>) -> Self {
        Self {
            prompt,
            section,
            target: target.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(HiddenField {
            name,
            value: value.into(),
        });
        self
    }
}

/// Response from a guarded form handler (PRG pattern).
pub enum CommandResponse {
    /// Ask before sending anything.
    Confirm(ConfirmTemplate),
    /// The command was sent; back to the dashboard.
    Redirect(Redirect),
}

impl CommandResponse {
    /// Map `outcome` to a response; a declined prompt becomes `confirm(prompt)`.
    pub fn from_outcome(
        outcome: ActionOutcome,
        confirm: impl FnOnce(String) -> ConfirmTemplate,
    ) -> Self {
        match outcome {
            ActionOutcome::Declined { prompt } => Self::Confirm(confirm(prompt)),
            ActionOutcome::Sent(_) => Self::Redirect(Redirect::to("/")),
        }
    }
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Confirm(page) => page.into_response(),
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}
