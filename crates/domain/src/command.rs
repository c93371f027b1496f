//! Command requests sent to the station's control server.
//!
//! A request names a server endpoint (`target`, e.g. `sys_control`) and
//! carries a `{ "command": …, "args": […] }` payload. The server executes a
//! system-level action (reboot, service control) or forwards a raw command
//! string to an instrument.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::name::{ServiceName, validate_identifier};

/// Endpoint handling process and service control.
pub const SYS_CONTROL: &str = "sys_control";

/// Endpoint forwarding raw command strings to instruments.
pub const INSTRUMENT: &str = "instrument";

/// A single command addressed to a server endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRequest {
    target: String,
    command: String,
    args: Vec<String>,
}

/// JSON body of a command POST.
#[derive(Debug, Serialize)]
pub struct CommandPayload<'a> {
    pub command: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub args: &'a [String],
}

impl CommandRequest {
    /// Create a request without arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `target` or `command` is empty or not
    /// an identifier.
    pub fn new(target: impl Into<String>, command: impl Into<String>) -> Result<Self, ValidationError> {
        let target = target.into();
        let command = command.into();
        validate_identifier(&target)?;
        validate_identifier(&command)?;
        Ok(Self {
            target,
            command,
            args: Vec::new(),
        })
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `sys_control` request driving a system service.
    #[must_use]
    pub fn service(service: &ServiceName, command: ServiceCommand) -> Self {
        Self {
            target: SYS_CONTROL.to_string(),
            command: "service".to_string(),
            args: vec![service.to_string(), command.to_string()],
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The body to POST to [`target`](Self::target).
    #[must_use]
    pub fn payload(&self) -> CommandPayload<'_> {
        CommandPayload {
            command: &self.command,
            args: &self.args,
        }
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What the server said after executing a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub body: String,
}

/// Per-service choice in the service-control form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCommand {
    #[default]
    None,
    Start,
    Stop,
    Status,
}

impl ServiceCommand {
    /// All choices in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Start, Self::Stop, Self::Status];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Status => "status",
        }
    }

    /// Whether choosing this sends anything.
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ServiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCommand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownServiceCommand(s.to_string()))
    }
}
