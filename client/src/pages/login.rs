//! Login page for email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards send unauthenticated visitors here with `?from=<path>`. Once the
//! session holds an identity the page replaces itself with that path, or
//! with `/` when `from` is missing or not a local path.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use access::SessionState;
use access::guard::post_login_destination;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        let state = session.get();
        if state.is_loading() || !state.is_authenticated() {
            return;
        }
        let from = query.with(|q| q.get("from"));
        let destination = post_login_destination(from.as_deref()).to_owned();
        navigate(&destination, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::sign_in_with_password(&email_value, &password_value).await {
                Ok(identity) => {
                    info.set(String::new());
                    crate::state::auth::complete_sign_in(session, identity);
                }
                Err(e) => info.set(e),
            }
            password.set(String::new());
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        let _ = (email_value, password_value);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Access Your Account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Enter Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Enter Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Login"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    "New here? "
                    <A href="/registration">"Create an account"</A>
                </p>
            </div>
        </div>
    }
}
