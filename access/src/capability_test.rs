use super::*;

#[test]
fn dashboard_home_follows_role() {
    assert_eq!(dashboard_home(Role::Admin), DashboardHome::Admin);
    assert_eq!(dashboard_home(Role::Volunteer), DashboardHome::Volunteer);
    assert_eq!(dashboard_home(Role::Donor), DashboardHome::Donor);
}

#[test]
fn only_staff_author_blogs() {
    assert!(can_author_blog(Role::Admin));
    assert!(can_author_blog(Role::Volunteer));
    assert!(!can_author_blog(Role::Donor));
}

#[test]
fn admins_moderate_blogs_by_status() {
    assert_eq!(
        blog_actions(Role::Admin, BlogStatus::Draft),
        BlogActions { publish: true, unpublish: false, delete: true }
    );
    assert_eq!(
        blog_actions(Role::Admin, BlogStatus::Published),
        BlogActions { publish: false, unpublish: true, delete: true }
    );
    assert_eq!(blog_actions(Role::Volunteer, BlogStatus::Draft), BlogActions::default());
}

#[test]
fn user_actions_toggle_block_and_promote_upwards() {
    assert_eq!(
        user_actions(Role::Donor, UserStatus::Active),
        vec![UserAction::Block, UserAction::Promote(Role::Volunteer), UserAction::Promote(Role::Admin)]
    );
    assert_eq!(
        user_actions(Role::Volunteer, UserStatus::Blocked),
        vec![UserAction::Unblock, UserAction::Promote(Role::Admin)]
    );
    assert_eq!(user_actions(Role::Admin, UserStatus::Active), vec![UserAction::Block]);
}

#[test]
fn donation_actions_for_in_progress_requests() {
    let volunteer = donation_actions(Role::Volunteer, DonationStatus::InProgress);
    assert!(volunteer.mark_done && volunteer.cancel);
    assert!(!volunteer.edit && !volunteer.delete && !volunteer.view);

    let admin = donation_actions(Role::Admin, DonationStatus::Done);
    assert!(!admin.mark_done && !admin.cancel);
    assert!(admin.edit && admin.delete && admin.view);
}

#[test]
fn only_pending_requests_accept_donations() {
    assert!(can_donate(DonationStatus::Pending));
    assert!(!can_donate(DonationStatus::InProgress));
    assert!(!can_donate(DonationStatus::Canceled));
}

#[test]
fn status_wire_values_are_lowercase() {
    assert_eq!(serde_json::to_value(DonationStatus::InProgress).unwrap(), "inprogress");
    assert_eq!(serde_json::from_str::<BlogStatus>("\"published\"").unwrap(), BlogStatus::Published);
    assert_eq!(serde_json::from_str::<UserStatus>("\"blocked\"").unwrap(), UserStatus::Blocked);
}
