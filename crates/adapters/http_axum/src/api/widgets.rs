//! Installed widget listing.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use dex_app::ports::CommandPoster;
use dex_domain::error::{DexError, NotFoundError};
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

use crate::error::ApiError;
use crate::state::AppState;

/// A widget together with its current view tree.
#[derive(Serialize)]
pub struct WidgetDetail {
    #[serde(flatten)]
    pub descriptor: WidgetDescriptor,
    pub view: Element,
}

/// `GET /api/widgets`: descriptors in registration order.
pub async fn list<P>(State(state): State<AppState<P>>) -> Json<Vec<WidgetDescriptor>>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let descriptors = state.dashboard.lock().registry().descriptors().cloned().collect();
    Json(descriptors)
}

/// `GET /api/widgets/{name}`: one widget and its view.
pub async fn get<P>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
) -> Result<Json<WidgetDetail>, ApiError>
where
    P: CommandPoster + Send + Sync + 'static,
{
    let dashboard = state.dashboard.lock();
    let widget = dashboard.registry().get(&name).ok_or_else(|| {
        DexError::from(NotFoundError {
            entity: "Widget",
            id: name.clone(),
        })
    })?;

    Ok(Json(WidgetDetail {
        descriptor: widget.descriptor.clone(),
        view: widget.view.clone(),
    }))
}
