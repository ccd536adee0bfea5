//! Client configuration — backend base URL and network timeouts.
//!
//! Every gateway request carries an explicit request and connect timeout so
//! a hung backend cannot leave a caller pending forever.

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const BACKEND_URL_VAR: &str = "NOTED_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, normalized to end with `/`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Build a config for the given backend base URL with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Endpoint paths are appended directly ("api/token" etc.).
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Load from `NOTED_BACKEND_URL`. Returns `None` if unset, in which
    /// case the host has no backend to talk to and gateways stay disabled.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(BACKEND_URL_VAR).ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url))
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
