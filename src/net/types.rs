//! Wire types shared by the gateways.

use serde::{Deserialize, Serialize};

/// User profile as serialized by the backend (`api/profile`).
///
/// Extra response fields (role, timestamps, embedded favorites) are ignored
/// here; favorites are peeled off separately by the profile fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Reference to a favorited note.
///
/// Older backend revisions serialized the key as `id` rather than
/// `note_id`; the alias accepts both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    #[serde(alias = "id")]
    pub note_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
