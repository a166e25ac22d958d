//! Role-scoped actions offered on dashboard pages.
//!
//! These decide which controls a page shows. The backend enforces the same
//! rules; a hidden button is a convenience, not a security boundary.

#[cfg(test)]
#[path = "capability_test.rs"]
mod capability_test;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Lifecycle of a donation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    InProgress,
    Done,
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

/// Landing widget shown on `/dashboard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardHome {
    /// Platform statistics and user management shortcuts.
    Admin,
    /// Statistics plus donation management shortcuts.
    Volunteer,
    /// The donor's most recent donation requests.
    Donor,
}

#[must_use]
pub fn dashboard_home(role: Role) -> DashboardHome {
    match role {
        Role::Admin => DashboardHome::Admin,
        Role::Volunteer => DashboardHome::Volunteer,
        Role::Donor => DashboardHome::Donor,
    }
}

#[must_use]
pub fn can_author_blog(role: Role) -> bool {
    match role {
        Role::Admin | Role::Volunteer => true,
        Role::Donor => false,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlogActions {
    pub publish: bool,
    pub unpublish: bool,
    pub delete: bool,
}

/// Content-management controls for one blog post. Only admins moderate.
#[must_use]
pub fn blog_actions(role: Role, status: BlogStatus) -> BlogActions {
    match role {
        Role::Admin => BlogActions {
            publish: status == BlogStatus::Draft,
            unpublish: status == BlogStatus::Published,
            delete: true,
        },
        Role::Volunteer | Role::Donor => BlogActions::default(),
    }
}

/// Admin action on a user row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Block,
    Unblock,
    /// Set the user's role.
    Promote(Role),
}

/// Actions an admin can take on a user with `role` and `status`.
///
/// Promotions only ever move up: donors can become volunteers or admins,
/// volunteers can become admins.
#[must_use]
pub fn user_actions(role: Role, status: UserStatus) -> Vec<UserAction> {
    let mut actions = vec![match status {
        UserStatus::Active => UserAction::Block,
        UserStatus::Blocked => UserAction::Unblock,
    }];
    match role {
        Role::Donor => actions.extend([UserAction::Promote(Role::Volunteer), UserAction::Promote(Role::Admin)]),
        Role::Volunteer => actions.push(UserAction::Promote(Role::Admin)),
        Role::Admin => {}
    }
    actions
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DonationActions {
    pub mark_done: bool,
    pub cancel: bool,
    pub edit: bool,
    pub delete: bool,
    pub view: bool,
}

/// Controls on the all-donation-requests table for a viewer with `role`.
#[must_use]
pub fn donation_actions(role: Role, status: DonationStatus) -> DonationActions {
    let in_progress = status == DonationStatus::InProgress;
    let admin = role == Role::Admin;
    DonationActions { mark_done: in_progress, cancel: in_progress, edit: admin, delete: admin, view: admin }
}

/// Whether a donor may answer a request with "donate".
#[must_use]
pub fn can_donate(status: DonationStatus) -> bool {
    status == DonationStatus::Pending
}
