//! Command endpoint configuration.

use serde::Deserialize;

/// Where and how commands are POSTed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommandHttpConfig {
    /// Base URL of the control server; the request target is appended as a path segment.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CommandHttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

impl CommandHttpConfig {
    /// Full URL of the endpoint for `target`.
    #[must_use]
    pub fn endpoint(&self, target: &str) -> String {
        format!("{}/{target}", self.base_url.trim_end_matches('/'))
    }
}
