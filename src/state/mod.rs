//! Client-side state.
//!
//! The session (token, profile, favorites) is the only state with
//! invariants worth holding; it lives in its own module behind a reducer.

pub mod session;
