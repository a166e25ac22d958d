//! Top navigation bar with session-aware links.

use access::{Role, RoleTracker, SessionState};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::{auth, roles};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let tracker = expect_context::<RwSignal<RoleTracker>>();

    let signed_in = move || session.with(SessionState::is_authenticated);
    let role_badge = move || roles::current_role(session, tracker).map(Role::as_str);
    let display_name = move || {
        session.with(|state| {
            state
                .identity()
                .map(|id| id.display_name.clone().unwrap_or_else(|| id.key.clone()))
                .unwrap_or_default()
        })
    };

    // Guarded pages redirect on their own once the session clears.
    let on_sign_out = move |_| auth::sign_out(session);

    view! {
        <nav class="nav-bar">
            <A href="/">"ScarletAid"</A>
            <A href="/donationRequest">"Donation Requests"</A>
            <A href="/blogs">"Blogs"</A>
            <A href="/searchDonor">"Search Donors"</A>
            <Show
                when=signed_in
                fallback=|| view! { <A href="/login">"Login"</A> <A href="/registration">"Register"</A> }
            >
                <A href="/fund">"Funding"</A>
                <A href="/dashboard">"Dashboard"</A>
                <span class="nav-bar__user">
                    {display_name}
                    {move || role_badge().map(|role| view! { <span class="nav-bar__role">{role}</span> })}
                </span>
                <button class="nav-bar__sign-out" on:click=on_sign_out>"Sign out"</button>
            </Show>
        </nav>
    }
}
