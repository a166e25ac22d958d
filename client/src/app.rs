//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the two shared signals every guard reads: the session and the
//! role tracker. It also builds the `RoleCache` over the browser directory,
//! provides it as a local `StoredValue`, and installs the effect that
//! resolves a role whenever the identity changes. The crate renders
//! client-side only, so `App` is mounted straight into `<body>`.

use std::rc::Rc;

use access::{RetryPolicy, RoleCache, RoleTracker, SessionState};
use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::net::api::{API_BASE_URL, BrowserRoleDirectory};
use crate::pages::dashboard::{
    AllDonationRequestsPage, ContentManagementPage, DashboardHomePage, GuardedSection, ManageUsersPage,
};
use crate::pages::forbidden::ForbiddenPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::public::{BlogDetailPage, DonationRequestsPage, PublicSection};
use crate::state::auth::restore_session;
use crate::state::roles::{SharedRoleCache, install_role_resolution};

/// Root application component.
///
/// Provides the session and role contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::initializing());
    let roles = RwSignal::new(RoleTracker::new());
    provide_context(session);
    provide_context(roles);

    let cache: SharedRoleCache = StoredValue::new_local(RoleCache::new(
        Rc::new(BrowserRoleDirectory::new(API_BASE_URL, session)),
        RetryPolicy::default(),
    ));
    provide_context(cache);
    install_role_resolution(session, roles, cache);

    Effect::new(move || restore_session(session));

    view! {
        <Stylesheet id="leptos" href="/pkg/scarlet-aid.css"/>
        <Title text="ScarletAid"/>

        <Router>
            <NavBar/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("forbidden") view=ForbiddenPage/>
                <Route
                    path=StaticSegment("registration")
                    view=|| view! { <PublicSection title="Registration" summary="Create a donor account."/> }
                />
                <Route path=StaticSegment("donationRequest") view=DonationRequestsPage/>
                <Route
                    path=StaticSegment("blogs")
                    view=|| view! { <PublicSection title="Blogs" summary="Stories and guidance from the community."/> }
                />
                <Route path=(StaticSegment("blogs"), ParamSegment("id")) view=BlogDetailPage/>
                <Route
                    path=StaticSegment("searchDonor")
                    view=|| view! { <PublicSection title="Search donors" summary="Find donors by blood group and location."/> }
                />

                <Route path=StaticSegment("fund") view=|| view! { <GuardedSection pattern="/fund" title="Funding"/> }/>
                <Route path=StaticSegment("dashboard") view=DashboardHomePage/>
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("profile"))
                    view=|| view! { <GuardedSection pattern="/dashboard/profile" title="Profile"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("my-donation-requests"))
                    view=|| view! { <GuardedSection pattern="/dashboard/my-donation-requests" title="My donation requests"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("create-donation-request"))
                    view=|| view! { <GuardedSection pattern="/dashboard/create-donation-request" title="Create donation request"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("donation-requests"), ParamSegment("id"))
                    view=|| view! { <GuardedSection pattern="/dashboard/donation-requests/:id" title="Donation request"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("donation-requests"), ParamSegment("id"), StaticSegment("edit"))
                    view=|| view! { <GuardedSection pattern="/dashboard/donation-requests/:id/edit" title="Edit donation request"/> }
                />
                <Route path=(StaticSegment("dashboard"), StaticSegment("manage-users")) view=ManageUsersPage/>
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("manage-donations"))
                    view=|| view! { <GuardedSection pattern="/dashboard/manage-donations" title="Manage donations"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("all-blood-donation-request"))
                    view=AllDonationRequestsPage
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("content-management"))
                    view=ContentManagementPage
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("add-blog"))
                    view=|| view! { <GuardedSection pattern="/dashboard/add-blog" title="Add blog"/> }
                />
                <Route
                    path=(StaticSegment("dashboard"), WildcardSegment("rest"))
                    view=|| view! { <GuardedSection pattern="/dashboard/*" title="Dashboard"/> }
                />
            </Routes>
        </Router>
    }
}
