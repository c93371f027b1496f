//! HTTP error response mapping.

use askama::Template;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use dex_domain::error::DexError;

/// Status code for a [`DexError`].
///
/// A failed command is the control server's fault, not the client's, so it
/// maps to `502 Bad Gateway`.
#[must_use]
pub fn status_of(err: &DexError) -> StatusCode {
    match err {
        DexError::Validation(_) | DexError::Snapshot(_) => StatusCode::BAD_REQUEST,
        DexError::NotFound(_) => StatusCode::NOT_FOUND,
        DexError::Command(_) => StatusCode::BAD_GATEWAY,
    }
}

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DexError`] to a JSON response with appropriate status code.
pub struct ApiError(DexError);

impl From<DexError> for ApiError {
    fn from(err: DexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "api request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Error page template listing what went wrong.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    status: StatusCode,
    code: u16,
    messages: Vec<String>,
}

impl ErrorTemplate {
    #[must_use]
    pub fn new(status: StatusCode, messages: Vec<String>) -> Self {
        Self {
            status,
            code: status.as_u16(),
            messages,
        }
    }
}

impl IntoResponse for ErrorTemplate {
    fn into_response(self) -> Response {
        (self.status, Html(self.to_string())).into_response()
    }
}

/// Maps [`DexError`] to a visible HTML error page.
pub struct PageError(DexError);

impl From<DexError> for PageError {
    fn from(err: DexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        tracing::warn!(%status, error = %self.0, "dashboard request failed");
        ErrorTemplate::new(status, vec![self.0.to_string()]).into_response()
    }
}
