//! Command poster port: deliver a command to the station's control server.

use std::future::Future;

use dex_domain::command::{CommandReply, CommandRequest};
use dex_domain::error::DexError;

/// Sends command requests to the server endpoint they name.
///
/// Delivery is at-most-once: implementations must not retry.
pub trait CommandPoster {
    /// POST `request` and wait for the server's reply.
    ///
    /// Transport and server failures surface as [`DexError::Command`].
    fn post(
        &self,
        request: CommandRequest,
    ) -> impl Future<Output = Result<CommandReply, DexError>> + Send;
}

impl<T: CommandPoster + Send + Sync> CommandPoster for std::sync::Arc<T> {
    fn post(
        &self,
        request: CommandRequest,
    ) -> impl Future<Output = Result<CommandReply, DexError>> + Send {
        (**self).post(request)
    }
}
