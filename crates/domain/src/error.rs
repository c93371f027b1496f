//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DexError`]
//! via `#[from]` (or an adapter-side `into_domain`).

/// Top-level error for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("invalid snapshot data: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("command failed: {0}")]
    Command(#[from] CommandError),
}

/// A domain invariant was violated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name {0:?} may only contain ASCII letters, digits, '_', '.' and '-'")]
    InvalidName(String),

    #[error("name {0:?} must contain something other than dots")]
    DotsOnlyName(String),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("a widget named {0:?} is already registered")]
    DuplicateWidget(String),

    #[error("age label {0:?} is not tracked by any widget")]
    UntrackedAge(String),

    #[error("a command button with id {0:?} already exists")]
    DuplicateCommand(String),

    #[error("service {0:?} is listed more than once")]
    DuplicateService(String),

    #[error("instrument {0:?} is already registered")]
    DuplicateInstrument(String),

    #[error("instrument command must not be empty")]
    EmptyInstrumentCommand,

    #[error("unknown service {0:?}")]
    UnknownService(String),

    #[error("unknown service command {0:?}")]
    UnknownServiceCommand(String),
}

/// A lookup by name or id found nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} {id:?} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A snapshot record was present but its fields did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("source {source_name:?} could not be decoded: {source}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("source {source_name:?} is not a JSON object")]
    NotAnObject { source_name: String },

    #[error("source {source_name:?} has a non-numeric _now: {found}")]
    InvalidAge { source_name: String, found: String },
}

/// Sending a command to the control server failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The request never produced a response (connection refused, timeout, …).
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success status.
    #[error("server rejected the command with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
