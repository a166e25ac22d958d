//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider is the source of truth for who is signed in. This
//! module mirrors its answer into `RwSignal<SessionState>` and keeps a copy in
//! `localStorage` so a reload restores the session without another sign-in.
//!
//! TRADE-OFFS
//! ==========
//! `Identity` never serializes its access token, so persistence goes through
//! [`StoredSession`], which does.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{Identity, SessionState};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::util::storage;

pub const SESSION_STORAGE_KEY: &str = "scarlet-aid.session";

/// Persisted form of a signed-in identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub key: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl From<&Identity> for StoredSession {
    fn from(identity: &Identity) -> Self {
        Self {
            key: identity.key.clone(),
            display_name: identity.display_name.clone(),
            access_token: identity.access_token.clone(),
        }
    }
}

impl From<StoredSession> for Identity {
    fn from(stored: StoredSession) -> Self {
        Self { key: stored.key, display_name: stored.display_name, access_token: stored.access_token }
    }
}

/// Session state after the provider reports `stored`.
pub fn restored_session(stored: Option<StoredSession>) -> SessionState {
    let mut state = SessionState::initializing();
    state.settle(stored.map(Identity::from));
    state
}

/// Settle the initial session from `localStorage`.
pub fn restore_session(session: RwSignal<SessionState>) {
    let state = restored_session(storage::load_json(SESSION_STORAGE_KEY));
    if let Some(key) = state.identity_key() {
        log_restored(key);
    }
    session.set(state);
}

pub fn complete_sign_in(session: RwSignal<SessionState>, identity: Identity) {
    storage::save_json(SESSION_STORAGE_KEY, &StoredSession::from(&identity));
    session.update(|s| s.settle(Some(identity)));
}

pub fn sign_out(session: RwSignal<SessionState>) {
    storage::remove(SESSION_STORAGE_KEY);
    session.update(SessionState::sign_out);
}

fn log_restored(key: &str) {
    #[cfg(feature = "csr")]
    log::debug!("restored session for {key}");
    #[cfg(not(feature = "csr"))]
    let _ = key;
}
