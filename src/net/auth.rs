//! Authentication gateway — token issuance, registration, profile fetch.
//!
//! ERROR HANDLING
//! ==============
//! `login` and `get_user` collapse every failure to `false` and report it
//! through an `AuthFailure` action, so form handlers branch on a boolean.
//! `signup` additionally returns the error to its caller — registration
//! failures carry a message the form must show inline. `login_with_google`
//! fails silently (the sign-in widget surfaces its own errors). These three
//! conventions are part of the observable contract; keep them apart.
//!
//! Session invalidation (401/422 on the profile endpoint, or a token that
//! will not even decode locally) always drops the whole session: clear the
//! persistent slot, dispatch `Logout`. Never a silent retry.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::types::{NoteRef, UserProfile};
use crate::config::ClientConfig;
use crate::state::session::{Action, SessionStore};
use crate::storage::TokenStorage;
use crate::token;

// =============================================================================
// ERROR
// =============================================================================

/// Failures of authentication gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token endpoint rejected the credentials (401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token endpoint rejected the form payload (422).
    #[error("invalid form data")]
    InvalidForm,

    /// Token endpoint could not parse the request (400).
    #[error("malformed request")]
    MalformedRequest,

    /// Registration endpoint rejected the payload (422); carries the
    /// server's message.
    #[error("{0}")]
    Validation(String),

    /// Registration endpoint could not use the payload (400).
    #[error("invalid registration data")]
    InvalidRegistration,

    /// Registration conflict (409).
    #[error("user already exists")]
    UserExists,

    /// 2xx issuance response without an `access_token` field.
    #[error("no token received from server")]
    MissingToken,

    /// The issued token does not decode.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The issued token decodes but has no usable subject claim.
    #[error("invalid token: subject claim missing")]
    MissingSubject,

    /// A profile fetch was attempted with no token at hand.
    #[error("no token provided")]
    NoToken,

    /// The backend no longer accepts the token (401/422 on the profile
    /// endpoint).
    #[error("session expired")]
    SessionExpired,

    /// Profile endpoint returned 404; the session itself is still good.
    #[error("profile not found")]
    ProfileNotFound,

    /// Any other non-2xx response.
    #[error("server error: {status} - {body}")]
    Server { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response body that does not parse.
    #[error("invalid server response: {0}")]
    BadBody(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Registration payload for `POST api/user`.
#[derive(Clone, Debug, Serialize)]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Stateless operations against the backend's auth endpoints. Holds handles
/// to the store and the persistent slot, no session state of its own.
pub struct AuthGateway {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<SessionStore>,
    storage: Arc<dyn TokenStorage>,
}

impl AuthGateway {
    /// Build a gateway with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(
        config: ClientConfig,
        store: Arc<SessionStore>,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, AuthError> {
        let http = super::build_http(&config).map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, store, storage })
    }

    /// Exchange credentials for a token. On success the token is persisted
    /// and `LoginSuccess` dispatched; every failure dispatches
    /// `AuthFailure` and resolves to `false`. Never raises.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.try_login(email, password).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, "login failed");
                self.store.dispatch(&Action::AuthFailure { message: err.to_string() });
                false
            }
        }
    }

    /// Register, then log in with the same credentials. Signup has no
    /// independent success state: the result is `login`'s result.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] if registration itself fails, after
    /// dispatching it as an `AuthFailure`.
    pub async fn signup(&self, data: &SignupData) -> Result<bool, AuthError> {
        if let Err(err) = self.try_signup(data).await {
            tracing::error!(%err, "signup failed");
            self.store.dispatch(&Action::AuthFailure { message: err.to_string() });
            return Err(err);
        }
        tracing::debug!("signup accepted, logging in");
        Ok(self.login(&data.email, &data.password).await)
    }

    /// Exchange an opaque Google credential for a backend token, then fetch
    /// the profile. Any failure collapses to `false` without an error
    /// action.
    pub async fn login_with_google(&self, credential: &str) -> bool {
        let token = match self.try_google(credential).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(%err, "google login failed");
                return false;
            }
        };
        self.get_user(&token).await
    }

    /// Drop the session: clear the persistent slot, dispatch `Logout`.
    /// Idempotent, no failure mode.
    pub fn logout(&self) {
        self.storage.clear();
        self.store.dispatch(&Action::Logout);
    }

    /// Fetch the profile for `token` and sync it (plus any favorites the
    /// response carries) into the store.
    ///
    /// A token that is empty or will not decode locally never reaches the
    /// network; 401/422 from the backend drops the session; 404 leaves it
    /// untouched.
    pub async fn get_user(&self, token: &str) -> bool {
        if token.is_empty() {
            tracing::error!("no token provided for profile fetch");
            self.store
                .dispatch(&Action::AuthFailure { message: AuthError::NoToken.to_string() });
            return false;
        }

        // Fail fast: a token that is garbage locally is not worth a
        // round-trip, and it cannot identify anyone — drop the session.
        let subject = token::decode(token).ok().and_then(|claims| claims.subject());
        let Some(subject) = subject else {
            tracing::warn!("stored token undecodable or missing subject, dropping session");
            self.expire_session();
            return false;
        };
        tracing::debug!(%subject, "requesting profile");

        match self.try_get_user(token).await {
            Ok(()) => true,
            Err(AuthError::SessionExpired) => {
                tracing::warn!("backend rejected token, dropping session");
                self.expire_session();
                false
            }
            Err(AuthError::ProfileNotFound) => {
                tracing::warn!("profile not found");
                false
            }
            Err(err) => {
                tracing::error!(%err, "profile fetch failed");
                self.store.dispatch(&Action::AuthFailure { message: err.to_string() });
                false
            }
        }
    }

    /// [`AuthGateway::get_user`] under its historical name.
    pub async fn verify_token(&self, token: &str) -> bool {
        self.get_user(token).await
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn try_login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.config.endpoint("api/token"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(status, "token endpoint responded");

        match status {
            401 => return Err(AuthError::InvalidCredentials),
            422 => return Err(AuthError::InvalidForm),
            400 => return Err(AuthError::MalformedRequest),
            s if !super::is_success(s) => return Err(AuthError::Server { status: s, body }),
            _ => {}
        }

        let token = extract_access_token(&body)?;
        self.validate_and_persist(&token)
    }

    async fn try_signup(&self, data: &SignupData) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.config.endpoint("api/user"))
            .json(data)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(status, "user endpoint responded");

        match status {
            422 => Err(AuthError::Validation(validation_message(&body))),
            400 => Err(AuthError::InvalidRegistration),
            409 => Err(AuthError::UserExists),
            s if super::is_success(s) => Ok(()),
            s => Err(AuthError::Server { status: s, body }),
        }
    }

    async fn try_google(&self, credential: &str) -> Result<String, AuthError> {
        let response = self
            .http
            .post(self.config.endpoint("api/google-login"))
            .json(&serde_json::json!({ "credential": credential }))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        if !super::is_success(status) {
            return Err(AuthError::Server { status, body });
        }

        let token = extract_access_token(&body)?;
        self.validate_and_persist(&token)?;
        Ok(token)
    }

    async fn try_get_user(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .get(self.config.endpoint("api/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!(status, "profile endpoint responded");

        match status {
            401 | 422 => return Err(AuthError::SessionExpired),
            404 => return Err(AuthError::ProfileNotFound),
            s if !super::is_success(s) => return Err(AuthError::Server { status: s, body }),
            _ => {}
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| AuthError::BadBody(e.to_string()))?;

        // Favorites ride along the profile response; sync them before the
        // user so observers never see a profile with stale favorites.
        if let Some(favorites) = data.get("favorites") {
            match serde_json::from_value::<Vec<NoteRef>>(favorites.clone()) {
                Ok(list) => self.store.dispatch(&Action::SetFavorites { list }),
                Err(err) => tracing::warn!(%err, "ignoring unparseable favorites in profile"),
            }
        }

        let user: UserProfile = serde_json::from_value(data).map_err(|e| AuthError::BadBody(e.to_string()))?;
        self.store.dispatch(&Action::SetUser { user });
        Ok(())
    }

    /// Decode-check the issued token, persist it, dispatch `LoginSuccess`.
    fn validate_and_persist(&self, token: &str) -> Result<(), AuthError> {
        let claims = token::decode(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let subject = claims.subject().ok_or(AuthError::MissingSubject)?;
        tracing::debug!(%subject, "token accepted");

        self.storage.store(token);
        self.store.dispatch(&Action::LoginSuccess { token: token.to_owned() });
        Ok(())
    }

    fn expire_session(&self) {
        self.storage.clear();
        self.store.dispatch(&Action::Logout);
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

fn extract_access_token(body: &str) -> Result<String, AuthError> {
    let data: Value = serde_json::from_str(body).map_err(|e| AuthError::BadBody(e.to_string()))?;
    data.get("access_token")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(AuthError::MissingToken)
}

// 422 bodies differ across backend revisions; probe the known message
// fields in priority order, then fall back to the raw body.
fn validation_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str(body) {
        for key in ["detail", "error", "msg"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    if body.is_empty() {
        "validation error".to_owned()
    } else {
        body.to_owned()
    }
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
