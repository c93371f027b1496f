//! Raw instrument command submissions.

use axum::extract::{Form, Path, State};
use serde::Deserialize;

use dex_app::ports::CommandPoster;

use super::confirm::{CommandResponse, ConfirmTemplate};
use crate::error::PageError;
use crate::state::AppState;

/// Form data of an instrument console.
#[derive(Debug, Deserialize)]
pub struct InstrumentForm {
    pub raw: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// `POST /instruments/{device}`: send a raw command string to an instrument.
///
/// The text is forwarded exactly as typed, surrounding whitespace included.
pub async fn send<P>(
    State(state): State<AppState<P>>,
    Path(device): Path<String>,
    Form(form): Form<InstrumentForm>,
) -> Result<CommandResponse, PageError>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let outcome = state
        .dashboard
        .send_to_instrument(state.poster.as_ref(), &device, &form.raw, &form.confirmed)
        .await?;
    Ok(CommandResponse::from_outcome(outcome, |prompt| {
        ConfirmTemplate::new(prompt, "instruments", device).with_field("raw", form.raw)
    }))
}
