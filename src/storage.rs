//! Persistent token slot.
//!
//! One key-value slot holds the raw bearer string so a session survives a
//! reload. The trait leaves the backing to the host (browser storage in a
//! WASM shell, memory in native harnesses); the slot is session-scoped —
//! durability beyond the process is the host's call.

use std::sync::Mutex;

/// The single persistent slot for the bearer token.
pub trait TokenStorage: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Option<String>;

    /// Overwrite the slot with a new token.
    fn store(&self, token: &str);

    /// Empty the slot. Idempotent.
    fn clear(&self);
}

/// In-memory slot living for the process. Default backing.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        // A poisoned lock reads as an empty slot rather than panicking.
        self.slot.lock().map_or(None, |slot| slot.clone())
    }

    fn store(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
