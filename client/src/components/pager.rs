//! Previous/next controls for paged tables.

#[cfg(test)]
#[path = "pager_test.rs"]
mod pager_test;

use access::pagination::Page;
use leptos::prelude::*;

pub fn pager_label(page: Page, total_pages: u32) -> String {
    format!("Page {} of {}", page.number(), total_pages.max(1))
}

/// Hidden while everything fits on one page.
#[component]
pub fn Pager(page: RwSignal<Page>, #[prop(into)] total_pages: Signal<u32>) -> impl IntoView {
    view! {
        <nav class="pager" hidden=move || total_pages.get() <= 1>
            <button
                type="button"
                disabled=move || !page.get().has_previous()
                on:click=move |_| page.update(|p| *p = p.previous())
            >
                "Previous"
            </button>
            <span class="pager__label">{move || pager_label(page.get(), total_pages.get())}</span>
            <button
                type="button"
                disabled=move || !page.get().has_next(total_pages.get())
                on:click=move |_| {
                    let last = total_pages.get_untracked();
                    page.update(|p| *p = p.next().clamped(last));
                }
            >
                "Next"
            </button>
        </nav>
    }
}
