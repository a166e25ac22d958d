//! Role state for the current identity, safe against identity changes.
//!
//! DESIGN
//! ======
//! Every identity-key change bumps a generation counter. Lookups are started
//! with a [`LookupTicket`] carrying the key and generation they were issued
//! for, and [`RoleTracker::apply`] drops any result whose ticket no longer
//! matches. A slow lookup for user A therefore can never become user B's role.

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tracker_test;

use super::{ResolveError, RoleResolution};
use crate::role::Role;
use crate::session::Identity;

/// Proof that a lookup was started for a particular identity generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    key: String,
    generation: u64,
}

impl LookupTicket {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleTracker {
    subject: Option<String>,
    generation: u64,
    resolution: RoleResolution,
}

impl RoleTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current identity.
    ///
    /// Returns a ticket when the identity key changed to a new, non-blank key;
    /// the caller is expected to start a lookup for it. Returns `None` when the
    /// key is unchanged or the identity went away.
    pub fn observe(&mut self, identity: Option<&Identity>) -> Option<LookupTicket> {
        let key = identity.and_then(Identity::lookup_key);
        if key == self.subject.as_deref() {
            return None;
        }

        self.generation += 1;
        self.subject = key.map(str::to_owned);
        match key {
            Some(key) => {
                self.resolution = RoleResolution::Resolving;
                tracing::debug!(key, generation = self.generation, "identity changed; role lookup required");
                Some(LookupTicket { key: key.to_owned(), generation: self.generation })
            }
            None => {
                self.resolution = RoleResolution::Unresolved;
                tracing::debug!(generation = self.generation, "identity cleared");
                None
            }
        }
    }

    /// Apply a finished lookup. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn apply(&mut self, ticket: &LookupTicket, result: Result<Role, ResolveError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                key = %ticket.key,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale role lookup result"
            );
            return false;
        }
        self.resolution = result.into();
        true
    }

    /// Force a fresh lookup for the current identity, e.g. after its role was
    /// changed by an administrator.
    pub fn refresh(&mut self) -> Option<LookupTicket> {
        let key = self.subject.clone()?;
        self.generation += 1;
        self.resolution = RoleResolution::Resolving;
        Some(LookupTicket { key, generation: self.generation })
    }

    #[must_use]
    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.generation && self.subject.as_deref() == Some(ticket.key.as_str())
    }

    /// Resolution for `identity`.
    ///
    /// Yields [`RoleResolution::Unresolved`] when the tracker has not yet
    /// observed this identity, so a previous user's role is never reported.
    #[must_use]
    pub fn resolution_for(&self, identity: Option<&Identity>) -> RoleResolution {
        let key = identity.and_then(Identity::lookup_key);
        if key.is_some() && key == self.subject.as_deref() {
            self.resolution.clone()
        } else {
            RoleResolution::Unresolved
        }
    }

    #[must_use]
    pub fn resolution(&self) -> &RoleResolution {
        &self.resolution
    }
}
