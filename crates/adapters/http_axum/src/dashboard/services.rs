//! Service-control form submission.

use std::str::FromStr;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use dex_app::ports::CommandPoster;
use dex_domain::command::ServiceCommand;
use dex_domain::error::DexError;

use crate::error::{ErrorTemplate, PageError};
use crate::state::AppState;

/// Prefix of the radio group names, one group per service.
pub const FIELD_PREFIX: &str = "svc.";

/// `POST /services`: apply the submitted choices and send the batch.
///
/// Fields are `svc.<service>=<choice>`; other fields are ignored. All
/// choices are validated before any of them is applied. Every choice is back
/// to `none` afterwards, whether or not the requests succeeded.
pub async fn submit<P>(
    State(state): State<AppState<P>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, PageError>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let mut choices = Vec::new();
    for (key, value) in fields {
        if let Some(service) = key.strip_prefix(FIELD_PREFIX) {
            let choice = ServiceCommand::from_str(&value).map_err(DexError::from)?;
            choices.push((service.to_string(), choice));
        }
    }

    let outcome = state
        .dashboard
        .submit_services(state.poster.as_ref(), &choices)
        .await?;
    if outcome.is_success() {
        tracing::info!(sent = outcome.sent.len(), "service commands sent");
        return Ok(Redirect::to("/").into_response());
    }

    let messages = outcome
        .failed
        .iter()
        .map(|(request, err)| format!("{request}: {err}"))
        .collect();
    Ok(ErrorTemplate::new(StatusCode::BAD_GATEWAY, messages).into_response())
}
