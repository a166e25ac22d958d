use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use access::{DenyReason, Redirect, RedirectTarget};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;

async fn volunteer_role(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    hits.fetch_add(1, Ordering::SeqCst);
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "role": "volunteer" })))
}

async fn spawn_counting_directory() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().route("/users/role", get(volunteer_role)).with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), hits)
}

#[tokio::test]
async fn check_paths_shares_one_lookup_across_guarded_paths() {
    let (base, hits) = spawn_counting_directory().await;
    let config = ResolverConfig { api_base_url: base, ..ResolverConfig::default() };
    let cache = build_cache(&config, Some("tok".to_owned())).unwrap();
    let identity = identity_for("vol@x.com").unwrap();
    let paths: Vec<String> =
        ["/dashboard/manage-users", "/dashboard", "/dashboard/add-blog", "/blogs"].map(str::to_owned).into();

    let reports = check_paths(&cache, identity, &paths).await;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let outcomes: Vec<(&str, &GuardOutcome)> = reports.iter().map(|r| (r.path, &r.outcome)).collect();
    assert_eq!(
        outcomes,
        vec![
            (
                "/dashboard/manage-users",
                &GuardOutcome::RedirectTo(Redirect {
                    target: RedirectTarget::Forbidden,
                    from: "/dashboard/manage-users".to_owned(),
                    reason: DenyReason::InsufficientRole,
                })
            ),
            ("/dashboard", &GuardOutcome::Allow),
            ("/dashboard/add-blog", &GuardOutcome::Allow),
            ("/blogs", &GuardOutcome::Allow),
        ]
    );
    assert_eq!(reports[3].access, RouteAccess::Public);
    assert_eq!(reports[2].access, RouteAccess::Guarded(GuardPolicy::admin_or_volunteer()));
}

#[test]
fn blank_identity_is_rejected() {
    assert!(matches!(identity_for("  "), Err(CliError::BlankIdentity)));
    assert!(matches!(identity_for(""), Err(CliError::BlankIdentity)));
}

#[test]
fn role_report_prints_the_trimmed_key() {
    let identity = identity_for("  vol@x.com \n").unwrap();
    let report = role_report(&identity, Role::Volunteer).unwrap();
    assert_eq!(report, json!({ "key": "vol@x.com", "role": "volunteer" }));
}
