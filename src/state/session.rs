//! Session state machine — the client's belief about who is logged in.
//!
//! DESIGN
//! ======
//! `reduce` is a pure `(Session, Action) -> Session` function; the store
//! wraps it in a lock so each dispatch is atomic. Gateways own all I/O and
//! are the only dispatchers. The store is an explicit handle passed to
//! whoever needs it, never an ambient singleton.
//!
//! INVARIANTS
//! ==========
//! `user` is never present while `token` is absent, and `favorites` is
//! never non-empty while `token` is absent: the only action that removes
//! the token is `Logout`, which clears all three together. The reducer does
//! not gate favorite actions on a token — gateways only dispatch them while
//! one exists.

use std::sync::Mutex;

use crate::net::types::{NoteRef, UserProfile};
use crate::storage::TokenStorage;

// =============================================================================
// SESSION
// =============================================================================

/// Client-side session state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Opaque bearer credential, mirrored in the persistent slot.
    pub token: Option<String>,
    /// Last-fetched profile; may lag behind `token` until a profile fetch
    /// resolves.
    pub user: Option<UserProfile>,
    /// Favorited notes, set only by explicit favorite-sync operations.
    pub favorites: Vec<NoteRef>,
    /// Most recent gateway failure message, for UI display.
    pub last_error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Actions accepted by the session reducer.
///
/// A closed set: the reducer matches exhaustively, so adding a variant
/// forces every match site to handle it instead of silently no-opping.
#[derive(Clone, Debug)]
pub enum Action {
    /// A token was issued and validated; the session becomes authenticated.
    LoginSuccess { token: String },
    /// The profile fetch resolved.
    SetUser { user: UserProfile },
    /// Drop the whole session. Valid from any state, idempotent.
    Logout,
    /// A note was favorited on the backend.
    AddFavorite { note: NoteRef },
    /// A note was unfavorited on the backend.
    RemoveFavorite { note_id: u64 },
    /// Full favorites sync.
    SetFavorites { list: Vec<NoteRef> },
    /// A gateway operation failed; carries the message for the UI.
    AuthFailure { message: String },
}

// =============================================================================
// REDUCER
// =============================================================================

/// Pure reducer. Never panics, performs no I/O.
#[must_use]
pub fn reduce(session: &Session, action: &Action) -> Session {
    match action {
        Action::LoginSuccess { token } => Session {
            token: Some(token.clone()),
            last_error: None,
            ..session.clone()
        },
        Action::SetUser { user } => Session {
            user: Some(user.clone()),
            ..session.clone()
        },
        Action::Logout => Session::default(),
        Action::AddFavorite { note } => {
            let mut next = session.clone();
            next.favorites.push(note.clone());
            next
        }
        Action::RemoveFavorite { note_id } => {
            let mut next = session.clone();
            next.favorites.retain(|fav| fav.note_id != *note_id);
            next
        }
        Action::SetFavorites { list } => Session {
            favorites: list.clone(),
            ..session.clone()
        },
        Action::AuthFailure { message } => Session {
            last_error: Some(message.clone()),
            ..session.clone()
        },
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Holds the single [`Session`] for the lifetime of the process.
///
/// Dispatch is synchronous and atomic per call; ordering across concurrent
/// gateway calls is only as correct as the order their responses resolve.
#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<Session>,
}

impl SessionStore {
    /// Create a store seeded from the persistent slot. A stored token is
    /// picked up as-is; `user` and `favorites` always start empty and must
    /// be re-fetched.
    #[must_use]
    pub fn new(storage: &dyn TokenStorage) -> Self {
        let session = Session {
            token: storage.load(),
            ..Session::default()
        };
        Self { inner: Mutex::new(session) }
    }

    /// Apply an action. Atomic: no observer sees a partially reduced state.
    pub fn dispatch(&self, action: &Action) {
        if let Ok(mut session) = self.inner.lock() {
            let next = reduce(&session, action);
            *session = next;
        }
    }

    /// Clone of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        // Reducers never panic, so a poisoned lock is unreachable; fall
        // back to the anonymous session rather than propagating the panic.
        self.inner.lock().map_or_else(|_| Session::default(), |session| session.clone())
    }

    /// Current token, if the session is authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.lock().map_or(None, |session| session.token.clone())
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
