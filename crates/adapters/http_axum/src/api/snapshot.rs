//! Snapshot intake and age readout.

use axum::Json;
use axum::extract::State;

use dex_app::age_tracker::AgeTracker;
use dex_app::dispatcher::DispatchReport;
use dex_app::ports::CommandPoster;
use dex_domain::snapshot::Snapshot;

use crate::state::AppState;

/// `POST /api/snapshot`: feed a snapshot to every widget.
///
/// Always answers `200` with the dispatch report; handler failures are
/// listed in it rather than failing the request.
pub async fn dispatch<P>(
    State(state): State<AppState<P>>,
    Json(snapshot): Json<Snapshot>,
) -> Json<DispatchReport>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let report = state.dashboard.lock().dispatch(&snapshot);
    if !report.is_clean() {
        tracing::warn!(failed = report.failures.len(), "snapshot partially applied");
    }
    Json(report)
}

/// `GET /api/ages`: the age tracker as `{ label: { age_s } }`.
pub async fn ages<P>(State(state): State<AppState<P>>) -> Json<AgeTracker>
where
    P: CommandPoster + Send + Sync + 'static,
{
    Json(state.dashboard.lock().ages().clone())
}
