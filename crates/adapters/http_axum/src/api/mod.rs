//! JSON API handler modules.

pub mod snapshot;
#[allow(clippy::missing_errors_doc)]
pub mod widgets;

use axum::Router;
use axum::routing::{get, post};

use dex_app::ports::CommandPoster;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: CommandPoster + Send + Sync + 'static,
{
    Router::new()
        .route("/snapshot", post(snapshot::dispatch::<P>))
        .route("/ages", get(snapshot::ages::<P>))
        .route("/widgets", get(widgets::list::<P>))
        .route("/widgets/{name}", get(widgets::get::<P>))
}
