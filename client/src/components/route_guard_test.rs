use access::{DenyReason, Identity, RedirectTarget, Role};

use super::*;

fn signed_in(key: &str) -> SessionState {
    SessionState::signed_in(Identity::new(key))
}

/// Tracker that has resolved `role` for `key`.
fn resolved(key: &str, role: Role) -> RoleTracker {
    let mut tracker = RoleTracker::new();
    let ticket = tracker.observe(Some(&Identity::new(key))).unwrap();
    tracker.apply(&ticket, Ok(role));
    tracker
}

#[test]
fn loading_message_distinguishes_session_from_role() {
    assert_eq!(loading_message(&SessionState::initializing()), "Checking your session...");
    assert_eq!(loading_message(&signed_in("a@x.com")), "Checking your access...");
}

#[test]
fn redirects_replace_history() {
    assert!(redirect_options().replace);
}

#[test]
fn switched_identity_waits_instead_of_reusing_previous_role() {
    let tracker = resolved("alice@x.com", Role::Admin);
    let admin = GuardPolicy::admin();
    assert_eq!(guard_outcome(admin, &signed_in("alice@x.com"), &tracker, "/dashboard/manage-users"), GuardOutcome::Allow);

    // Bob signed in but the tracker has not observed him yet.
    assert_eq!(
        guard_outcome(admin, &signed_in("bob@x.com"), &tracker, "/dashboard/manage-users"),
        GuardOutcome::Loading
    );
}

#[test]
fn failed_lookup_redirects_to_forbidden() {
    let mut tracker = RoleTracker::new();
    let ticket = tracker.observe(Some(&Identity::new("a@x.com"))).unwrap();
    let err = access::ResolveError {
        key: "a@x.com".into(),
        attempts: 3,
        cause: access::DirectoryError::Status { status: 503 },
    };
    tracker.apply(&ticket, Err(err));

    let GuardOutcome::RedirectTo(redirect) =
        guard_outcome(GuardPolicy::authenticated(), &signed_in("a@x.com"), &tracker, "/dashboard")
    else {
        panic!("expected a redirect");
    };
    assert_eq!(redirect.target, RedirectTarget::Forbidden);
    assert_eq!(redirect.reason, DenyReason::ResolutionFailed);
}

#[test]
fn signed_out_visitor_goes_to_login_with_return_path() {
    let outcome = guard_outcome(GuardPolicy::volunteer(), &SessionState::signed_out(), &RoleTracker::new(), "/fund");
    let GuardOutcome::RedirectTo(redirect) = outcome else {
        panic!("expected a redirect");
    };
    assert_eq!(redirect.location(), "/login?from=%2Ffund");
}
