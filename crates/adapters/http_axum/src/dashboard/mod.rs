//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! Every form POSTs back and is answered with a redirect to `/` (PRG
//! pattern), a confirmation page, or an error page.

#[allow(clippy::missing_errors_doc)]
pub mod commands;
pub mod confirm;
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod instruments;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::{get, post};

use dex_app::ports::CommandPoster;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: CommandPoster + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<P>))
        .route("/commands/{id}", post(commands::press::<P>))
        .route("/services", post(services::submit::<P>))
        .route("/instruments/{device}", post(instruments::send::<P>))
}
