//! Paged donation-request listings shared by the public and dashboard tables.

#[cfg(test)]
#[path = "donations_test.rs"]
mod donations_test;

use access::SessionState;
use access::pagination::Page;
use leptos::prelude::*;

use crate::net::api::{DonationFeed, DonationRequestList};
#[cfg(feature = "csr")]
use crate::net::api::fetch_donation_requests;

/// The last page that finished loading, with its result.
pub type ListingState = Option<(Page, Result<DonationRequestList, String>)>;

/// Page count of the loaded listing; 1 until something loads.
pub fn listing_page_count(state: &ListingState) -> u32 {
    match state {
        Some((loaded, Ok(list))) => list.page_count(*loaded),
        _ => 1,
    }
}

/// The page to move to when `loaded` falls past the listing's last page.
pub fn settle_page(loaded: Page, list: &DonationRequestList) -> Option<Page> {
    let settled = loaded.clamped(list.page_count(loaded));
    (settled != loaded).then_some(settled)
}

/// Fetch `requested` into `listing`, dropping the response if `page` has
/// moved on by the time it arrives.
pub fn load_donation_requests(
    feed: DonationFeed,
    page: RwSignal<Page>,
    requested: Page,
    access_token: Option<String>,
    listing: RwSignal<ListingState>,
) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = fetch_donation_requests(feed, requested, access_token).await;
        if let Err(message) = &result {
            log::warn!("donation requests page {} failed: {message}", requested.number());
        }
        if page.get_untracked() == requested {
            listing.set(Some((requested, result)));
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = (feed, page, requested, access_token, listing);
}

/// Page selection plus the loaded listing for `feed`, reloading whenever the
/// page or the signed-in token changes.
pub fn use_donation_listing(feed: DonationFeed) -> (RwSignal<Page>, RwSignal<ListingState>) {
    let session = expect_context::<RwSignal<SessionState>>();
    let page = RwSignal::new(Page::default());
    let listing = RwSignal::new(None::<(Page, Result<DonationRequestList, String>)>);

    Effect::new(move || {
        let requested = page.get();
        let token = session.with(|state| state.identity().and_then(|id| id.access_token.clone()));
        load_donation_requests(feed, page, requested, token, listing);
    });

    Effect::new(move || {
        let settled = listing.with(|state| match state {
            Some((loaded, Ok(list))) => settle_page(*loaded, list),
            _ => None,
        });
        if let Some(settled) = settled {
            page.set(settled);
        }
    });

    (page, listing)
}
