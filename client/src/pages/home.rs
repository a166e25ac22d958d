//! Public landing page.

use access::SessionState;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let signed_in = move || session.with(SessionState::is_authenticated);

    view! {
        <main class="home-page">
            <section class="home-hero">
                <h1>"Donate blood, save lives"</h1>
                <p>"ScarletAid connects donors with people who need blood, fast."</p>
                <div class="home-hero__actions">
                    <Show
                        when=signed_in
                        fallback=|| view! { <A href="/registration">"Join as a donor"</A> }
                    >
                        <A href="/dashboard">"Go to dashboard"</A>
                    </Show>
                    <A href="/searchDonor">"Search donors"</A>
                </div>
            </section>
        </main>
    }
}
