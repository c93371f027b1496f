//! Command adapter error types.

use dex_domain::error::{CommandError, DexError};

/// Errors specific to the reqwest command poster.
#[derive(Debug, thiserror::Error)]
pub enum CommandHttpError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request did not complete (connect, timeout, reading the body).
    #[error("command request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("command endpoint answered {status}")]
    Rejected { status: u16, body: String },
}

impl CommandHttpError {
    /// Convert into a [`DexError::Command`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> DexError {
        match self {
            Self::Rejected { status, body } => CommandError::Rejected { status, body }.into(),
            other => CommandError::Transport(Box::new(other)).into(),
        }
    }
}

impl From<CommandHttpError> for DexError {
    fn from(err: CommandHttpError) -> Self {
        err.into_domain()
    }
}
