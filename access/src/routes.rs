//! Client route table and per-route access.
//!
//! Patterns use `:name` for a single dynamic segment. Lookups ignore query
//! strings, fragments and trailing slashes. Anything under `/dashboard` that
//! is not listed still requires sign-in, because the dashboard layout itself
//! sits behind the authenticated guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use serde::Serialize;

use crate::guard::GuardPolicy;

/// Access requirement of a client route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "access", content = "policy", rename_all = "snake_case")]
pub enum RouteAccess {
    Public,
    Guarded(GuardPolicy),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RouteRule {
    pub pattern: &'static str,
    #[serde(flatten)]
    pub access: RouteAccess,
}

const fn public(pattern: &'static str) -> RouteRule {
    RouteRule { pattern, access: RouteAccess::Public }
}

const fn guarded(pattern: &'static str, policy: GuardPolicy) -> RouteRule {
    RouteRule { pattern, access: RouteAccess::Guarded(policy) }
}

const DASHBOARD_PREFIX: &str = "/dashboard";

static ROUTES: &[RouteRule] = &[
    public("/"),
    public("/login"),
    public("/registration"),
    public("/forbidden"),
    public("/donationRequest"),
    public("/blogs"),
    public("/blogs/:id"),
    public("/searchDonor"),
    guarded("/fund", GuardPolicy::authenticated()),
    guarded("/dashboard", GuardPolicy::authenticated()),
    guarded("/dashboard/profile", GuardPolicy::authenticated()),
    guarded("/dashboard/my-donation-requests", GuardPolicy::authenticated()),
    guarded("/dashboard/create-donation-request", GuardPolicy::authenticated()),
    guarded("/dashboard/donation-requests/:id", GuardPolicy::authenticated()),
    guarded("/dashboard/donation-requests/:id/edit", GuardPolicy::authenticated()),
    guarded("/dashboard/manage-users", GuardPolicy::admin()),
    guarded("/dashboard/manage-donations", GuardPolicy::volunteer()),
    guarded("/dashboard/all-blood-donation-request", GuardPolicy::admin_or_volunteer()),
    guarded("/dashboard/content-management", GuardPolicy::admin_or_volunteer()),
    guarded("/dashboard/add-blog", GuardPolicy::admin_or_volunteer()),
];

/// Every known route, in declaration order.
#[must_use]
pub fn route_table() -> &'static [RouteRule] {
    ROUTES
}

/// Access requirement for a concrete client path.
#[must_use]
pub fn access_for(path: &str) -> RouteAccess {
    let path = normalize(path);
    if let Some(rule) = ROUTES.iter().find(|rule| matches_pattern(rule.pattern, path)) {
        return rule.access;
    }
    if path == DASHBOARD_PREFIX || path.starts_with("/dashboard/") {
        RouteAccess::Guarded(GuardPolicy::authenticated())
    } else {
        RouteAccess::Public
    }
}

/// Strip query, fragment and trailing slashes; the root stays `/`.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let dynamic = expected.starts_with(':') && !actual.is_empty();
                if !dynamic && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
