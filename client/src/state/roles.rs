//! Role resolution driver for the signed-in identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides `RwSignal<RoleTracker>` next to the session signal, plus the
//! `RoleCache` as a local [`StoredValue`]. The effect installed here observes
//! identity changes, hands each change a [`LookupTicket`], and applies the
//! cache result through that ticket so a slow lookup for a previous identity
//! is discarded.
//!
//! DESIGN
//! ======
//! The reactive functions are thin: each one calls a plain step
//! ([`observe_session`], [`refresh_current_role`], [`lookup_ends_session`])
//! over borrowed state, so the transitions run natively in tests.
//!
//! ERROR HANDLING
//! ==============
//! A directory `401` means the provider token is no longer accepted; the
//! session is signed out instead of leaving the user stuck on `/forbidden`.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use access::{DirectoryError, LookupTicket, ResolveError, Role, RoleCache, RoleTracker, SessionState};
use leptos::prelude::*;

/// The browser's role cache. It is `!Send`, so it lives in local storage.
pub type SharedRoleCache = StoredValue<RoleCache, LocalStorage>;

/// Track the session's identity. Returns a ticket when a lookup must start,
/// and empties `cache` once the session has settled signed out.
pub fn observe_session(state: &SessionState, tracker: &mut RoleTracker, cache: &RoleCache) -> Option<LookupTicket> {
    let ticket = tracker.observe(state.identity());
    if !state.is_loading() && !state.is_authenticated() {
        cache.clear();
    }
    ticket
}

/// Drop the cached role for the signed-in identity and issue a ticket for a
/// fresh lookup, e.g. after an administrator changed that role.
pub fn refresh_current_role(state: &SessionState, tracker: &mut RoleTracker, cache: &RoleCache) -> Option<LookupTicket> {
    let key = state.identity_key()?;
    cache.invalidate(key);
    tracker.refresh()
}

/// Whether a failed lookup invalidates the signed-in session.
pub fn ends_session(err: &ResolveError) -> bool {
    matches!(err.cause, DirectoryError::Unauthorized)
}

/// Whether `result` for `ticket` should sign the session out. Results for a
/// superseded identity never do.
pub fn lookup_ends_session(tracker: &RoleTracker, ticket: &LookupTicket, result: &Result<Role, ResolveError>) -> bool {
    tracker.is_current(ticket) && matches!(result, Err(err) if ends_session(err))
}

/// Start a role lookup every time the session identity changes, and drop
/// cached roles once the session is signed out.
pub fn install_role_resolution(session: RwSignal<SessionState>, roles: RwSignal<RoleTracker>, cache: SharedRoleCache) {
    Effect::new(move || {
        let ticket = cache
            .with_value(|cache| session.with(|state| roles.try_update(|tracker| observe_session(state, tracker, cache))))
            .flatten();
        if let Some(ticket) = ticket {
            spawn_lookup(cache.get_value(), session, roles, ticket);
        }
    });
}

/// Re-resolve the signed-in identity's role, bypassing the cache.
pub fn refresh_role(session: RwSignal<SessionState>, roles: RwSignal<RoleTracker>, cache: SharedRoleCache) {
    let ticket = cache
        .with_value(|cache| {
            session.with_untracked(|state| roles.try_update(|tracker| refresh_current_role(state, tracker, cache)))
        })
        .flatten();
    if let Some(ticket) = ticket {
        spawn_lookup(cache.get_value(), session, roles, ticket);
    }
}

fn spawn_lookup(cache: RoleCache, session: RwSignal<SessionState>, roles: RwSignal<RoleTracker>, ticket: LookupTicket) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = cache.fetch(ticket.key()).await;
        if let Err(err) = &result {
            log::warn!("role lookup for {} failed after {} attempt(s): {}", err.key, err.attempts, err.cause);
        }
        if roles.with_untracked(|tracker| lookup_ends_session(tracker, &ticket, &result)) {
            crate::state::auth::sign_out(session);
        }
        roles.update(|tracker| {
            tracker.apply(&ticket, result);
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (cache, session, roles, ticket);
}

/// Role resolved for the identity currently in `session`, if any.
///
/// Reactive: tracks both signals when called inside an effect or view.
pub fn current_role(session: RwSignal<SessionState>, roles: RwSignal<RoleTracker>) -> Option<Role> {
    session.with(|state| roles.with(|tracker| tracker.resolution_for(state.identity()).role()))
}
