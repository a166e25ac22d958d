use access::capability::{DonationActions, dashboard_home};

use super::*;

#[test]
fn policy_for_follows_route_table() {
    assert_eq!(policy_for("/dashboard/manage-users"), GuardPolicy::admin());
    assert_eq!(policy_for("/dashboard/manage-donations"), GuardPolicy::volunteer());
    assert_eq!(policy_for("/dashboard/add-blog"), GuardPolicy::admin_or_volunteer());
    assert_eq!(policy_for("/dashboard/donation-requests/:id/edit"), GuardPolicy::authenticated());
}

#[test]
fn policy_for_public_pattern_still_requires_sign_in() {
    assert_eq!(policy_for("/blogs"), GuardPolicy::authenticated());
}

#[test]
fn home_links_are_reachable_by_their_role() {
    for role in Role::ALL {
        for (href, _) in home_links(dashboard_home(role)) {
            assert!(policy_for(href).permits(role), "{role} cannot open {href}");
        }
    }
}

#[test]
fn user_action_labels_name_target_role() {
    assert_eq!(user_action_label(UserAction::Block), "Block");
    assert_eq!(user_action_label(UserAction::Promote(Role::Volunteer)), "Make volunteer");
}

#[test]
fn donation_labels_only_list_enabled_controls() {
    let actions = DonationActions { mark_done: true, cancel: true, ..DonationActions::default() };
    assert_eq!(donation_action_labels(actions), vec!["Done", "Cancel"]);
    assert_eq!(join_or_dash(&donation_action_labels(DonationActions::default())), "-");
}

#[test]
fn blog_labels_for_admin_draft() {
    let labels = blog_action_labels(blog_actions(Role::Admin, BlogStatus::Draft));
    assert_eq!(labels, vec!["Publish", "Delete"]);
    assert!(blog_action_labels(blog_actions(Role::Volunteer, BlogStatus::Published)).is_empty());
}

#[test]
fn donation_controls_follow_viewer_role_and_status() {
    assert_eq!(donation_controls(Some(Role::Volunteer), DonationStatus::InProgress), "Done, Cancel");
    assert_eq!(donation_controls(Some(Role::Admin), DonationStatus::Pending), "View, Edit, Delete");
    assert_eq!(donation_controls(None, DonationStatus::InProgress), "-");
}

#[test]
fn status_labels_are_readable() {
    assert_eq!(donation_status_label(DonationStatus::InProgress), "in progress");
    assert_eq!(donation_status_label(DonationStatus::Canceled), "canceled");
}
