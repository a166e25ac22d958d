//! Role-gated route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated synchronously on every render of a protected route. Inputs are
//! the injected session, the role tracker's resolution and the requested path;
//! the guard starts no lookups and keeps no state of its own.
//!
//! DESIGN
//! ======
//! One [`GuardPolicy`] (required role set + where unauthenticated users go)
//! replaces per-role guard copies. Lookup failure is an explicit denial so a
//! directory outage can never leave a route spinning forever.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use serde::Serialize;

use crate::resolver::RoleResolution;
use crate::role::{Role, RoleSet};
use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const FORBIDDEN_PATH: &str = "/forbidden";
pub const HOME_PATH: &str = "/";

/// Where a denied user is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectTarget {
    Login,
    Forbidden,
}

impl RedirectTarget {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Forbidden => FORBIDDEN_PATH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No identity in the session.
    Unauthenticated,
    /// Identity present but its role is outside the required set.
    InsufficientRole,
    /// The directory lookup failed after its retry budget.
    ResolutionFailed,
}

/// A denial: where to go and the path the user asked for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: RedirectTarget,
    /// Originally requested path, for returning after login.
    pub from: String,
    pub reason: DenyReason,
}

impl Redirect {
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.target.path()
    }

    /// Target URL with the requested path attached as `?from=`.
    #[must_use]
    pub fn location(&self) -> String {
        match serde_urlencoded::to_string([("from", self.from.as_str())]) {
            Ok(query) if !self.from.is_empty() => format!("{}?{query}", self.path()),
            _ => self.path().to_owned(),
        }
    }
}

/// What a guarded route renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Loading,
    RedirectTo(Redirect),
    Allow,
}

/// Access policy of one guarded route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GuardPolicy {
    required: RoleSet,
    unauthenticated: RedirectTarget,
}

impl GuardPolicy {
    /// Policy requiring one of `required`; unauthenticated users go to login.
    #[must_use]
    pub const fn requiring(required: RoleSet) -> Self {
        Self { required, unauthenticated: RedirectTarget::Login }
    }

    /// Any signed-in user with a known role.
    #[must_use]
    pub const fn authenticated() -> Self {
        Self::requiring(RoleSet::ALL)
    }

    #[must_use]
    pub const fn admin() -> Self {
        Self::requiring(RoleSet::only(Role::Admin))
    }

    #[must_use]
    pub const fn volunteer() -> Self {
        Self::requiring(RoleSet::only(Role::Volunteer))
    }

    #[must_use]
    pub const fn admin_or_volunteer() -> Self {
        Self::requiring(RoleSet::of(&[Role::Admin, Role::Volunteer]))
    }

    /// Override where users without an identity are sent.
    #[must_use]
    pub const fn with_unauthenticated_redirect(mut self, target: RedirectTarget) -> Self {
        self.unauthenticated = target;
        self
    }

    #[must_use]
    pub fn required(&self) -> RoleSet {
        self.required
    }

    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        self.required.contains(role)
    }

    /// Decide what the route at `requested_path` renders.
    ///
    /// `role` must be the tracker's resolution for the session's identity
    /// (see `RoleTracker::resolution_for`).
    #[must_use]
    pub fn evaluate(&self, session: &SessionState, role: &RoleResolution, requested_path: &str) -> GuardOutcome {
        if session.is_loading() {
            return GuardOutcome::Loading;
        }
        if session.identity().is_none() {
            return Self::deny(self.unauthenticated, DenyReason::Unauthenticated, requested_path);
        }
        match role {
            // Identity present but its lookup has not started or not finished.
            RoleResolution::Unresolved | RoleResolution::Resolving => GuardOutcome::Loading,
            RoleResolution::Failed(_) => {
                Self::deny(RedirectTarget::Forbidden, DenyReason::ResolutionFailed, requested_path)
            }
            RoleResolution::Resolved(role) if self.permits(*role) => GuardOutcome::Allow,
            RoleResolution::Resolved(_) => {
                Self::deny(RedirectTarget::Forbidden, DenyReason::InsufficientRole, requested_path)
            }
        }
    }

    fn deny(target: RedirectTarget, reason: DenyReason, requested_path: &str) -> GuardOutcome {
        GuardOutcome::RedirectTo(Redirect { target, from: requested_path.to_owned(), reason })
    }
}

/// Where to go after a successful login given the `from` a guard attached.
///
/// Only local absolute paths are honoured; anything else falls back to home.
#[must_use]
pub fn post_login_destination(from: Option<&str>) -> &str {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => HOME_PATH,
    }
}
