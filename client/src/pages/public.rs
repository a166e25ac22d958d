//! Public browsing pages that need no sign-in.

#[cfg(test)]
#[path = "public_test.rs"]
mod public_test;

use access::capability::can_donate;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::pager::Pager;
use crate::net::api::{DonationFeed, DonationRequestRow};
use crate::state::donations::{listing_page_count, use_donation_listing};

#[component]
pub fn PublicSection(title: &'static str, summary: &'static str) -> impl IntoView {
    view! {
        <main class="public-page">
            <h1>{title}</h1>
            <p>{summary}</p>
        </main>
    }
}

#[component]
pub fn BlogDetailPage() -> impl IntoView {
    let params = use_params_map();
    let blog_id = move || params.with(|p| p.get("id")).unwrap_or_default();

    view! {
        <main class="public-page">
            <h1>"Blog"</h1>
            <p class="public-page__id">{blog_id}</p>
        </main>
    }
}

/// Detail link for a request a donor can still answer. Opening it requires
/// sign-in, which the detail route enforces.
pub fn donate_link(row: &DonationRequestRow) -> Option<String> {
    can_donate(row.status).then(|| format!("/dashboard/donation-requests/{}", row.id))
}

#[component]
pub fn DonationRequestsPage() -> impl IntoView {
    let (page, listing) = use_donation_listing(DonationFeed::Public);
    let total_pages = Signal::derive(move || listing.with(listing_page_count));

    let cards = move || {
        listing.with(|state| match state {
            None => view! { <p class="public-page__status">"Loading requests..."</p> }.into_any(),
            Some((_, Err(message))) => view! { <p class="public-page__error">{message.clone()}</p> }.into_any(),
            Some((_, Ok(list))) if list.requests.is_empty() => {
                view! { <p class="public-page__status">"No pending requests right now."</p> }.into_any()
            }
            Some((_, Ok(list))) => list
                .requests
                .iter()
                .map(|row| {
                    view! {
                        <article class="donation-card">
                            <h2>{row.recipient_name.clone()}</h2>
                            <p>{row.location()}</p>
                            <p>{row.blood_group.clone()} " on " {row.donation_date.clone()} " at " {row.donation_time.clone()}</p>
                            {donate_link(row).map(|href| view! { <A href=href>"View"</A> })}
                        </article>
                    }
                })
                .collect_view()
                .into_any(),
        })
    };

    view! {
        <main class="public-page">
            <h1>"Donation requests"</h1>
            <p>"Pending requests waiting for a donor."</p>
            <div class="donation-cards">{cards}</div>
            <Pager page=page total_pages=total_pages/>
        </main>
    }
}
