//! Favorites gateway — CRUD over the user's favorited notes.
//!
//! The store is only updated after the backend accepts a mutation, and
//! blindly: the backend's verdict is ground truth. Two racing mutations for
//! the same note can leave the list out of step until the next full sync.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::types::NoteRef;
use crate::config::ClientConfig;
use crate::state::session::{Action, SessionStore};
use crate::storage::TokenStorage;

/// Failures of favorites gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// Mutation attempted with no token in the slot.
    #[error("not logged in")]
    NoToken,

    /// Backend refused the mutation; carries the server's message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Operations against the backend's favorites endpoints, layered on the
/// token in the persistent slot.
pub struct FavoritesGateway {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<SessionStore>,
    storage: Arc<dyn TokenStorage>,
}

impl FavoritesGateway {
    /// Build a gateway with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::HttpClientBuild`] if the HTTP client
    /// cannot be constructed.
    pub fn new(
        config: ClientConfig,
        store: Arc<SessionStore>,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, FavoritesError> {
        let http = super::build_http(&config).map_err(|e| FavoritesError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, store, storage })
    }

    /// Full favorites sync. No-op while logged out; fetch failures are
    /// logged and swallowed, the list just stays stale.
    pub async fn get_favorites(&self) {
        let Some(token) = self.storage.load() else {
            tracing::debug!("skipping favorites sync, no token");
            return;
        };
        match self.try_get(&token).await {
            Ok(list) => self.store.dispatch(&Action::SetFavorites { list }),
            Err(err) => tracing::warn!(%err, "favorites sync failed"),
        }
    }

    /// Favorite a note. Dispatches `AddFavorite` with the note the backend
    /// echoes back (or a bare ref if it echoes none).
    ///
    /// # Errors
    ///
    /// [`FavoritesError::NoToken`] while logged out,
    /// [`FavoritesError::Rejected`] with the server's message on non-2xx.
    pub async fn add_favorite(&self, note_id: u64) -> Result<(), FavoritesError> {
        let token = self.storage.load().ok_or(FavoritesError::NoToken)?;
        let body = self.mutate(Method::POST, note_id, &token).await?;

        let note = serde_json::from_str::<NoteRef>(&body).unwrap_or(NoteRef { note_id, title: None });
        self.store.dispatch(&Action::AddFavorite { note });
        Ok(())
    }

    /// Unfavorite a note. Dispatches `RemoveFavorite` on acceptance.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`FavoritesGateway::add_favorite`].
    pub async fn remove_favorite(&self, note_id: u64) -> Result<(), FavoritesError> {
        let token = self.storage.load().ok_or(FavoritesError::NoToken)?;
        self.mutate(Method::DELETE, note_id, &token).await?;

        self.store.dispatch(&Action::RemoveFavorite { note_id });
        Ok(())
    }

    async fn try_get(&self, token: &str) -> Result<Vec<NoteRef>, FavoritesError> {
        let response = self
            .http
            .get(self.config.endpoint("api/favorites"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        if !super::is_success(status) {
            return Err(FavoritesError::Rejected { status, message: server_message(&body) });
        }
        serde_json::from_str(&body).map_err(|e| FavoritesError::Transport(e.to_string()))
    }

    async fn mutate(&self, method: Method, note_id: u64, token: &str) -> Result<String, FavoritesError> {
        let url = self.config.endpoint(&format!("api/favorites/{note_id}"));
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(status, note_id, "favorites endpoint responded");

        if !super::is_success(status) {
            return Err(FavoritesError::Rejected { status, message: server_message(&body) });
        }
        Ok(body)
    }
}

// Mutation rejections carry a `msg` field; fall back to the raw body.
fn server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

fn transport(err: reqwest::Error) -> FavoritesError {
    FavoritesError::Transport(err.to_string())
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;
