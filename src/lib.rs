//! # noted-client
//!
//! Session and token core for the NOTED note-sharing backend: token
//! decoding, the client-side session store, and the authentication and
//! favorites gateways that keep it in sync with the server.
//!
//! ARCHITECTURE
//! ============
//! A view calls a gateway operation, the gateway performs the HTTP call and
//! translates the outcome into [`state::session::Action`]s dispatched to a
//! [`state::session::SessionStore`]. The reducer is pure; gateways own all
//! I/O and are the error boundary — callers see booleans and store state,
//! never raw network errors. Token decoding is advisory (claims for UX);
//! the backend's status codes are the real authorization check.

pub mod config;
pub mod net;
pub mod state;
pub mod storage;
pub mod token;

pub use config::ClientConfig;
pub use net::auth::{AuthError, AuthGateway, SignupData};
pub use net::favorites::{FavoritesError, FavoritesGateway};
pub use net::types::{NoteRef, UserProfile};
pub use state::session::{Action, Session, SessionStore};
pub use storage::{MemoryTokenStorage, TokenStorage};
pub use token::{DecodeError, DecodedClaims};
