//! Shared fixtures for gateway tests: an axum mock backend bound to an
//! ephemeral port, plus store/storage wiring.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::config::ClientConfig;
use crate::state::session::SessionStore;
use crate::storage::{MemoryTokenStorage, TokenStorage};

/// Serve `app` on an ephemeral port and return its address.
pub(crate) async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub(crate) struct Harness {
    pub config: ClientConfig,
    pub store: Arc<SessionStore>,
    pub storage: Arc<MemoryTokenStorage>,
}

pub(crate) fn harness(addr: SocketAddr) -> Harness {
    harness_at(format!("http://{addr}"))
}

/// Wire a fresh store and empty slot against an arbitrary base URL
/// (tests that must not hit the network point this at a closed port).
pub(crate) fn harness_at(base_url: impl Into<String>) -> Harness {
    let storage = Arc::new(MemoryTokenStorage::new());
    let store = Arc::new(SessionStore::new(storage.as_ref()));
    Harness {
        config: ClientConfig::new(base_url),
        store,
        storage,
    }
}

pub(crate) fn storage_handle(harness: &Harness) -> Arc<dyn TokenStorage> {
    Arc::clone(&harness.storage) as Arc<dyn TokenStorage>
}

/// A well-formed three-segment token with the given `sub` claim.
pub(crate) fn token_with_sub(sub: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({ "sub": sub, "exp": 1_999_999_999 }).to_string());
    format!("{header}.{payload}.sig")
}

/// A decodable token whose payload has no `sub` claim at all.
pub(crate) fn token_without_sub() -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": 1_999_999_999 }).to_string());
    format!("{header}.{payload}.sig")
}

pub(crate) fn profile_body(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "username": format!("user{id}"),
        "first_name": "Test",
        "last_name": "User",
        "bio": null,
    })
}
