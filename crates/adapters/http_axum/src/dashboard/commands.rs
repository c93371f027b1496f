//! Command button submissions.

use axum::extract::{Form, Path, State};
use serde::Deserialize;

use dex_app::ports::CommandPoster;

use super::confirm::{CommandResponse, ConfirmTemplate};
use crate::error::PageError;
use crate::state::AppState;

/// Form data of a button press; `confirmed` is only set by the confirm page.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirmed: bool,
}

/// `POST /commands/{id}`: press a command button.
pub async fn press<P>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> Result<CommandResponse, PageError>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let outcome = state
        .dashboard
        .press_button(state.poster.as_ref(), &id, &form.confirmed)
        .await?;
    Ok(CommandResponse::from_outcome(outcome, |prompt| {
        ConfirmTemplate::new(prompt, "commands", id)
    }))
}
