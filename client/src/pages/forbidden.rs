//! Landing page for guard denials.
//!
//! A denial may come from a stale role (an administrator just promoted the
//! user) or from a directory outage. "Check again" drops the cached role,
//! re-resolves it, and returns to the denied path, where the guard decides
//! afresh.

use access::guard::post_login_destination;
use access::{RoleTracker, SessionState};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::roles::{SharedRoleCache, refresh_role};

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let roles = expect_context::<RwSignal<RoleTracker>>();
    let cache = expect_context::<SharedRoleCache>();
    let query = use_query_map();
    let navigate = use_navigate();

    let signed_in = move || session.with(SessionState::is_authenticated);
    let on_check_again = move |_| {
        refresh_role(session, roles, cache);
        let from = query.with_untracked(|q| q.get("from"));
        navigate(post_login_destination(from.as_deref()), NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <main class="forbidden-page">
            <h1>"403"</h1>
            <p>"You do not have access to this page."</p>
            <button class="forbidden-page__retry" on:click=on_check_again hidden=move || !signed_in()>
                "Check again"
            </button>
            <A href="/">"Back to home"</A>
        </main>
    }
}
