//! Dashboard pages behind the role guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page here wraps its content in `RouteGuard` using the policy that
//! `access::routes` registers for the page's route pattern, so the router and
//! the access table cannot drift apart. The dashboard home dispatches on the
//! resolved role; the management pages list the controls the viewer's role
//! unlocks, and the request table pages through the backend listing.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use access::capability::{
    BlogActions, BlogStatus, DashboardHome, DonationActions, DonationStatus, UserAction, UserStatus,
    blog_actions, can_author_blog, dashboard_home, donation_actions, user_actions,
};
use access::routes::{self, RouteAccess};
use access::{GuardPolicy, Role, RoleTracker, SessionState};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::pager::Pager;
use crate::components::route_guard::RouteGuard;
use crate::net::api::DonationFeed;
use crate::state::donations::{listing_page_count, use_donation_listing};
use crate::state::roles::current_role;

/// Policy registered for a dashboard route pattern. Unlisted patterns still
/// require a signed-in user.
pub fn policy_for(pattern: &str) -> GuardPolicy {
    match routes::access_for(pattern) {
        RouteAccess::Guarded(policy) => policy,
        RouteAccess::Public => GuardPolicy::authenticated(),
    }
}

/// Shortcut links shown on the dashboard home for each landing variant.
pub fn home_links(home: DashboardHome) -> &'static [(&'static str, &'static str)] {
    match home {
        DashboardHome::Admin => &[
            ("/dashboard/manage-users", "Manage users"),
            ("/dashboard/all-blood-donation-request", "All donation requests"),
            ("/dashboard/content-management", "Content management"),
        ],
        DashboardHome::Volunteer => &[
            ("/dashboard/manage-donations", "Manage donations"),
            ("/dashboard/all-blood-donation-request", "All donation requests"),
            ("/dashboard/content-management", "Content management"),
        ],
        DashboardHome::Donor => &[
            ("/dashboard/my-donation-requests", "My donation requests"),
            ("/dashboard/create-donation-request", "Create donation request"),
        ],
    }
}

fn user_action_label(action: UserAction) -> String {
    match action {
        UserAction::Block => "Block".to_owned(),
        UserAction::Unblock => "Unblock".to_owned(),
        UserAction::Promote(role) => format!("Make {role}"),
    }
}

fn donation_action_labels(actions: DonationActions) -> Vec<&'static str> {
    [
        (actions.mark_done, "Done"),
        (actions.cancel, "Cancel"),
        (actions.view, "View"),
        (actions.edit, "Edit"),
        (actions.delete, "Delete"),
    ]
    .into_iter()
    .filter_map(|(enabled, label)| enabled.then_some(label))
    .collect()
}

fn blog_action_labels(actions: BlogActions) -> Vec<&'static str> {
    [(actions.publish, "Publish"), (actions.unpublish, "Unpublish"), (actions.delete, "Delete")]
        .into_iter()
        .filter_map(|(enabled, label)| enabled.then_some(label))
        .collect()
}

fn join_or_dash(labels: &[impl AsRef<str>]) -> String {
    if labels.is_empty() {
        return "-".to_owned();
    }
    labels.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// Reactive accessor for the signed-in viewer's role; `None` only outside a
/// passed guard.
fn use_viewer_role() -> impl Fn() -> Option<Role> + Copy + Send + Sync + 'static {
    let session = expect_context::<RwSignal<SessionState>>();
    let roles = expect_context::<RwSignal<RoleTracker>>();
    move || current_role(session, roles)
}

/// Guarded placeholder for sections without role-specific controls.
#[component]
pub fn GuardedSection(pattern: &'static str, title: &'static str) -> impl IntoView {
    view! {
        <RouteGuard policy=policy_for(pattern)>
            <section class="dashboard-section">
                <h1>{title}</h1>
            </section>
        </RouteGuard>
    }
}

#[component]
pub fn DashboardHomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let viewer_role = use_viewer_role();
    let greeting = move || {
        session.with(|state| {
            state.identity().map(|id| id.display_name.clone().unwrap_or_else(|| id.key.clone())).unwrap_or_default()
        })
    };

    view! {
        <RouteGuard policy=policy_for("/dashboard")>
            <section class="dashboard-home">
                <h1>"Welcome, " {greeting}</h1>
                {move || {
                    viewer_role()
                        .map(|role| {
                            let home = dashboard_home(role);
                            let heading = match home {
                                DashboardHome::Admin => "Platform overview",
                                DashboardHome::Volunteer => "Volunteer overview",
                                DashboardHome::Donor => "Your recent donation requests",
                            };
                            view! {
                                <h2>{heading}</h2>
                                <ul class="dashboard-home__links">
                                    {home_links(home)
                                        .iter()
                                        .map(|(href, label)| view! { <li><A href=*href>{*label}</A></li> })
                                        .collect_view()}
                                </ul>
                            }
                        })
                }}
            </section>
        </RouteGuard>
    }
}

#[component]
pub fn ManageUsersPage() -> impl IntoView {
    view! {
        <RouteGuard policy=policy_for("/dashboard/manage-users")>
            <section class="dashboard-section">
                <h1>"Manage users"</h1>
                <table class="dashboard-table">
                    <thead>
                        <tr><th>"Role"</th><th>"Active"</th><th>"Blocked"</th></tr>
                    </thead>
                    <tbody>
                        {Role::ALL
                            .iter()
                            .map(|&role| {
                                let labels = |status| {
                                    let actions: Vec<String> =
                                        user_actions(role, status).into_iter().map(user_action_label).collect();
                                    join_or_dash(&actions)
                                };
                                view! {
                                    <tr>
                                        <td>{role.as_str()}</td>
                                        <td>{labels(UserStatus::Active)}</td>
                                        <td>{labels(UserStatus::Blocked)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </section>
        </RouteGuard>
    }
}

fn donation_status_label(status: DonationStatus) -> &'static str {
    match status {
        DonationStatus::Pending => "pending",
        DonationStatus::InProgress => "in progress",
        DonationStatus::Done => "done",
        DonationStatus::Canceled => "canceled",
    }
}

/// Controls column for one request; a dash when nothing applies.
fn donation_controls(role: Option<Role>, status: DonationStatus) -> String {
    role.map_or_else(|| "-".to_owned(), |role| join_or_dash(&donation_action_labels(donation_actions(role, status))))
}

#[component]
pub fn AllDonationRequestsPage() -> impl IntoView {
    view! {
        <RouteGuard policy=policy_for("/dashboard/all-blood-donation-request")>
            <section class="dashboard-section">
                <h1>"All blood donation requests"</h1>
                <AllDonationRequestsTable/>
            </section>
        </RouteGuard>
    }
}

/// Rendered only once the guard allows, so nothing loads for denied viewers.
#[component]
fn AllDonationRequestsTable() -> impl IntoView {
    let viewer_role = use_viewer_role();
    let (page, listing) = use_donation_listing(DonationFeed::All);
    let total_pages = Signal::derive(move || listing.with(listing_page_count));

    let rows = move || {
        listing.with(|state| match state {
            None => view! { <p class="dashboard-section__status">"Loading requests..."</p> }.into_any(),
            Some((_, Err(message))) => view! { <p class="dashboard-section__error">{message.clone()}</p> }.into_any(),
            Some((_, Ok(list))) if list.requests.is_empty() => {
                view! { <p class="dashboard-section__status">"No donation requests yet."</p> }.into_any()
            }
            Some((loaded, Ok(list))) => {
                let role = viewer_role();
                view! {
                    <table class="dashboard-table">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Recipient"</th>
                                <th>"Location"</th>
                                <th>"Date"</th>
                                <th>"Time"</th>
                                <th>"Blood group"</th>
                                <th>"Status"</th>
                                <th>"Controls"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .requests
                                .iter()
                                .enumerate()
                                .map(|(index, row)| {
                                    view! {
                                        <tr>
                                            <td>{loaded.row_number(index).to_string()}</td>
                                            <td>{row.recipient_name.clone()}</td>
                                            <td>{row.location()}</td>
                                            <td>{row.donation_date.clone()}</td>
                                            <td>{row.donation_time.clone()}</td>
                                            <td>{row.blood_group.clone()}</td>
                                            <td>{donation_status_label(row.status)}</td>
                                            <td>{donation_controls(role, row.status)}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }
        })
    };

    view! {
        {rows}
        <Pager page=page total_pages=total_pages/>
    }
}

#[component]
pub fn ContentManagementPage() -> impl IntoView {
    let viewer_role = use_viewer_role();
    view! {
        <RouteGuard policy=policy_for("/dashboard/content-management")>
            <section class="dashboard-section">
                <h1>"Content management"</h1>
                {move || {
                    viewer_role()
                        .map(|role| {
                            let draft = join_or_dash(&blog_action_labels(blog_actions(role, BlogStatus::Draft)));
                            let published = join_or_dash(&blog_action_labels(blog_actions(role, BlogStatus::Published)));
                            view! {
                                {can_author_blog(role).then(|| view! { <A href="/dashboard/add-blog">"Add blog"</A> })}
                                <dl class="dashboard-list">
                                    <dt>"Draft"</dt>
                                    <dd>{draft}</dd>
                                    <dt>"Published"</dt>
                                    <dd>{published}</dd>
                                </dl>
                            }
                        })
                }}
            </section>
        </RouteGuard>
    }
}
