//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is owned by the app shell and injected into every guard. It is
//! created in the `initializing` state at start-up, settles once the auth
//! provider reports, and is torn down to `signed_out` on sign-out. Guards and
//! the role tracker only read it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Authenticated principal as reported by the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable lookup key; the account email.
    pub key: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Bearer token for the REST backend, when the provider issued one.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), display_name: None, access_token: None }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Trimmed key, or `None` when the key is blank.
    ///
    /// A blank key never reaches the role directory.
    #[must_use]
    pub fn lookup_key(&self) -> Option<&str> {
        let key = self.key.trim();
        (!key.is_empty()).then_some(key)
    }
}

/// Session snapshot read by guards on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initializing()
    }
}

impl SessionState {
    /// Start-up state: the auth provider has not reported yet.
    #[must_use]
    pub fn initializing() -> Self {
        Self { identity: None, loading: true }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { identity: None, loading: false }
    }

    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        let mut state = Self::signed_out();
        state.settle(Some(identity));
        state
    }

    /// Apply the auth provider's report. Blank-key identities are dropped.
    pub fn settle(&mut self, identity: Option<Identity>) {
        self.identity = identity.filter(|id| id.lookup_key().is_some());
        self.loading = false;
    }

    /// Mark a sign-in attempt as in progress. The current identity is kept
    /// until the provider settles.
    pub fn begin_sign_in(&mut self) {
        self.loading = true;
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
        self.loading = false;
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.identity.is_some()
    }

    /// Lookup key of the current identity, if any.
    #[must_use]
    pub fn identity_key(&self) -> Option<&str> {
        self.identity.as_ref().and_then(Identity::lookup_key)
    }
}
