//! Gateways — network I/O translated into session store actions.
//!
//! ERROR HANDLING
//! ==============
//! Gateways are the error boundary: transport failures and domain
//! rejections are mapped here and surface to callers as booleans, typed
//! errors or `AuthFailure` actions. Nothing past a gateway ever sees a raw
//! network error. No operation retries; every failure is reported once and
//! left to a user-initiated retry.

pub mod auth;
pub mod favorites;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Duration;

use crate::config::ClientConfig;

pub(crate) fn build_http(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
