//! Shared application state for axum handlers.

use std::sync::Arc;

use dex_app::dashboard::{Dashboard, SharedDashboard};
use dex_app::ports::CommandPoster;

/// Default page reload interval in seconds.
pub const DEFAULT_REFRESH_SECONDS: u32 = 5;

/// Application state shared across all axum handlers.
///
/// Generic over the command poster to avoid dynamic dispatch. `Clone` is
/// implemented manually so the poster itself does not need to be `Clone`;
/// only the shared handles are cloned.
pub struct AppState<P> {
    /// The dashboard controller. Never locked across an `.await`.
    pub dashboard: SharedDashboard,
    /// Delivers command requests to the control server.
    pub poster: Arc<P>,
    /// `<meta http-equiv="refresh">` interval of the dashboard page.
    pub refresh_seconds: u32,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            poster: Arc::clone(&self.poster),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<P> AppState<P>
where
    P: CommandPoster + Send + Sync + 'static,
{
    /// Create a new application state.
    pub fn new(dashboard: Dashboard, poster: P) -> Self {
        Self::from_shared(SharedDashboard::new(dashboard), Arc::new(poster))
    }

    /// Create a new application state from already shared handles.
    ///
    /// Use this when the dashboard or poster also need to be reachable
    /// outside the HTTP handlers, as in tests.
    pub fn from_shared(dashboard: SharedDashboard, poster: Arc<P>) -> Self {
        Self {
            dashboard,
            poster,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }

    #[must_use]
    pub fn with_refresh_seconds(mut self, refresh_seconds: u32) -> Self {
        self.refresh_seconds = refresh_seconds;
        self
    }
}
