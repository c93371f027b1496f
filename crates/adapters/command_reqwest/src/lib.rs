//! # dex-adapter-command-reqwest
//!
//! Implements the [`CommandPoster`] port with a [`reqwest::Client`].
//!
//! A request for target `sys_control` is POSTed to
//! `{base_url}/sys_control` with the JSON body
//! `{ "command": …, "args": […] }`. Any 2xx status is success and the
//! response text becomes the [`CommandReply`]; every other status is a
//! rejection. There is no retry.
//!
//! ## Dependency rule
//!
//! Depends on `dex-app` (port traits) and `dex-domain` only.

mod config;
mod error;

use std::time::Duration;

use dex_app::ports::CommandPoster;
use dex_domain::command::{CommandReply, CommandRequest};
use dex_domain::error::DexError;

pub use config::CommandHttpConfig;
pub use error::CommandHttpError;

/// Posts command requests to the station's control server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCommandPoster {
    client: reqwest::Client,
    config: CommandHttpConfig,
}

impl HttpCommandPoster {
    /// Create a poster with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`CommandHttpError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: CommandHttpConfig) -> Result<Self, CommandHttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CommandHttpError::Client)?;
        Ok(Self { client, config })
    }

    async fn send(&self, request: &CommandRequest) -> Result<CommandReply, CommandHttpError> {
        let url = self.config.endpoint(request.target());
        tracing::debug!(%url, %request, "sending command");

        let response = self
            .client
            .post(&url)
            .json(&request.payload())
            .send()
            .await
            .map_err(|source| CommandHttpError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| CommandHttpError::Request { url, source })?;

        if !status.is_success() {
            return Err(CommandHttpError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(CommandReply { body })
    }
}

impl CommandPoster for HttpCommandPoster {
    async fn post(&self, request: CommandRequest) -> Result<CommandReply, DexError> {
        self.send(&request).await.map_err(CommandHttpError::into_domain)
    }
}
