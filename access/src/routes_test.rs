use super::*;

#[test]
fn public_pages_need_no_guard() {
    for path in ["/", "/login", "/registration", "/forbidden", "/blogs", "/blogs/65f0c1", "/searchDonor"] {
        assert_eq!(access_for(path), RouteAccess::Public, "{path}");
    }
}

#[test]
fn dashboard_pages_map_to_their_guards() {
    assert_eq!(access_for("/dashboard"), RouteAccess::Guarded(GuardPolicy::authenticated()));
    assert_eq!(access_for("/dashboard/profile"), RouteAccess::Guarded(GuardPolicy::authenticated()));
    assert_eq!(access_for("/dashboard/manage-users"), RouteAccess::Guarded(GuardPolicy::admin()));
    assert_eq!(access_for("/dashboard/manage-donations"), RouteAccess::Guarded(GuardPolicy::volunteer()));
    assert_eq!(access_for("/dashboard/add-blog"), RouteAccess::Guarded(GuardPolicy::admin_or_volunteer()));
    assert_eq!(
        access_for("/dashboard/all-blood-donation-request"),
        RouteAccess::Guarded(GuardPolicy::admin_or_volunteer())
    );
}

#[test]
fn dynamic_segments_match_single_segment() {
    assert_eq!(access_for("/dashboard/donation-requests/abc123"), RouteAccess::Guarded(GuardPolicy::authenticated()));
    assert_eq!(
        access_for("/dashboard/donation-requests/abc123/edit"),
        RouteAccess::Guarded(GuardPolicy::authenticated())
    );
    assert!(!matches_pattern("/blogs/:id", "/blogs"));
    assert!(!matches_pattern("/blogs/:id", "/blogs/1/comments"));
}

#[test]
fn query_fragment_and_trailing_slash_are_ignored() {
    assert_eq!(access_for("/dashboard/manage-users/?page=2"), RouteAccess::Guarded(GuardPolicy::admin()));
    assert_eq!(access_for("/dashboard/add-blog#editor"), RouteAccess::Guarded(GuardPolicy::admin_or_volunteer()));
    assert_eq!(access_for(""), RouteAccess::Public);
    assert_eq!(normalize("///"), "/");
}

#[test]
fn unknown_dashboard_paths_still_require_sign_in() {
    assert_eq!(access_for("/dashboard/something-new"), RouteAccess::Guarded(GuardPolicy::authenticated()));
    assert_eq!(access_for("/dashboards"), RouteAccess::Public);
    assert_eq!(access_for("/no-such-page"), RouteAccess::Public);
}

#[test]
fn route_table_patterns_are_unique() {
    let table = route_table();
    for (i, rule) in table.iter().enumerate() {
        assert!(table[i + 1..].iter().all(|other| other.pattern != rule.pattern), "{}", rule.pattern);
    }
}

#[test]
fn route_rule_serializes_flat() {
    let rule = route_table().iter().find(|rule| rule.pattern == "/dashboard/manage-users").unwrap();
    let json = serde_json::to_value(rule).unwrap();
    assert_eq!(json["pattern"], "/dashboard/manage-users");
    assert_eq!(json["access"], "guarded");
    assert_eq!(json["policy"]["required"], serde_json::json!(["admin"]));
    assert_eq!(json["policy"]["unauthenticated"], "login");

    let json = serde_json::to_value(route_table()[0]).unwrap();
    assert_eq!(json, serde_json::json!({ "pattern": "/", "access": "public" }));
}
