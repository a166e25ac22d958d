//! Role-gated route wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route renders its page inside `RouteGuard`. The guard
//! re-evaluates its `GuardPolicy` whenever the session, the tracked role, or
//! the current path changes, and the three outcomes map to three renderings:
//! a loading indicator, a replace-navigation to the redirect location, or the
//! wrapped children.
//!
//! DESIGN
//! ======
//! The tracked role is read through `RoleTracker::resolution_for`, so a role
//! resolved for a previous identity is never evaluated against the current
//! one. Redirects use `replace` so the denied path does not stay in history.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use access::{GuardOutcome, GuardPolicy, RoleTracker, SessionState};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

/// Text shown while the outcome is `Loading`.
pub fn loading_message(session: &SessionState) -> &'static str {
    if session.is_loading() { "Checking your session..." } else { "Checking your access..." }
}

/// Outcome for `policy` given the session and the tracked role.
pub fn guard_outcome(policy: GuardPolicy, session: &SessionState, tracker: &RoleTracker, path: &str) -> GuardOutcome {
    let resolution = tracker.resolution_for(session.identity());
    policy.evaluate(session, &resolution, path)
}

fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Render `children` only when `policy` allows the current session.
#[component]
pub fn RouteGuard(policy: GuardPolicy, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let roles = expect_context::<RwSignal<RoleTracker>>();
    let location = use_location();
    let navigate = use_navigate();

    let outcome = Memo::new(move |_| {
        let path = location.pathname.get();
        session.with(|state| roles.with(|tracker| guard_outcome(policy, state, tracker, &path)))
    });

    Effect::new(move || {
        if let GuardOutcome::RedirectTo(redirect) = outcome.get() {
            navigate(&redirect.location(), redirect_options());
        }
    });

    move || match outcome.get() {
        GuardOutcome::Allow => children().into_any(),
        GuardOutcome::Loading => {
            let message = session.with(loading_message);
            view! {
                <div class="route-guard route-guard--loading" role="status">
                    <span class="route-guard__spinner"></span>
                    <p>{message}</p>
                </div>
            }
            .into_any()
        }
        GuardOutcome::RedirectTo(_) => ().into_any(),
    }
}
