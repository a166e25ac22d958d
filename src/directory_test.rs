use std::collections::HashMap;
use std::rc::Rc;

use access::{GuardOutcome, GuardPolicy, Identity, RoleCache, RoleResolution, SessionState};
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;

async fn role_by_key(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, String)> {
    let authorized = headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer tok");
    if !authorized {
        return Err((StatusCode::UNAUTHORIZED, String::new()));
    }
    match params.get("key").map(String::as_str) {
        Some("a@x.com") => Ok(Json(json!({ "role": "admin" }))),
        Some("d@x.com") => Ok(Json(json!({ "role": "donor" }))),
        Some("odd@x.com") => Ok(Json(json!({ "role": "superuser" }))),
        Some("garbled@x.com") => Err((StatusCode::OK, "not json".to_owned())),
        Some("down@x.com") => Err((StatusCode::SERVICE_UNAVAILABLE, String::new())),
        Some("blocked@x.com") => Err((StatusCode::FORBIDDEN, String::new())),
        _ => Err((StatusCode::NOT_FOUND, String::new())),
    }
}

async fn spawn_directory() -> String {
    let app = Router::new().route("/users/role", get(role_by_key));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

fn directory(base_url: &str, token: Option<&str>) -> HttpRoleDirectory {
    let config = ResolverConfig { api_base_url: base_url.to_owned(), ..ResolverConfig::default() };
    HttpRoleDirectory::new(&config, token.map(str::to_owned)).unwrap()
}

#[test]
fn role_endpoint_joins_base_url() {
    assert_eq!(role_endpoint("https://api.example.test/"), "https://api.example.test/users/role");
    assert_eq!(role_endpoint("http://127.0.0.1:3000"), "http://127.0.0.1:3000/users/role");
}

#[tokio::test]
async fn lookup_parses_directory_role() {
    let base = spawn_directory().await;
    let dir = directory(&base, Some("tok"));
    assert_eq!(dir.lookup_role("a@x.com").await, Ok(Role::Admin));
    assert_eq!(dir.lookup_role("d@x.com").await, Ok(Role::Donor));
}

#[tokio::test]
async fn lookup_maps_error_statuses() {
    let base = spawn_directory().await;
    let dir = directory(&base, Some("tok"));
    assert_eq!(dir.lookup_role("blocked@x.com").await, Err(DirectoryError::Forbidden));
    assert_eq!(dir.lookup_role("down@x.com").await, Err(DirectoryError::Status { status: 503 }));
    assert_eq!(dir.lookup_role("nobody@x.com").await, Err(DirectoryError::Status { status: 404 }));

    let anonymous = directory(&base, None);
    assert_eq!(anonymous.lookup_role("a@x.com").await, Err(DirectoryError::Unauthorized));
}

#[tokio::test]
async fn lookup_rejects_bad_bodies() {
    let base = spawn_directory().await;
    let dir = directory(&base, Some("tok"));
    assert!(matches!(dir.lookup_role("odd@x.com").await, Err(DirectoryError::UnknownRole(_))));
    assert!(matches!(dir.lookup_role("garbled@x.com").await, Err(DirectoryError::Decode(_))));
}

#[tokio::test]
async fn unreachable_directory_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = directory(&format!("http://{addr}"), Some("tok"));
    let err = dir.lookup_role("a@x.com").await.unwrap_err();
    assert!(matches!(err, DirectoryError::Transport(_)), "{err:?}");
    assert!(err.retryable());
}

#[tokio::test]
async fn guard_over_http_directory() {
    let base = spawn_directory().await;
    let cache = RoleCache::new(Rc::new(directory(&base, Some("tok"))), access::RetryPolicy::new(2));

    let donor = Identity::new("d@x.com");
    let session = SessionState::signed_in(donor.clone());
    let role = cache.resolve(Some(&donor)).await;
    assert_eq!(role, RoleResolution::Resolved(Role::Donor));
    assert!(matches!(
        GuardPolicy::admin().evaluate(&session, &role, "/dashboard/manage-users"),
        GuardOutcome::RedirectTo(_)
    ));
    assert_eq!(GuardPolicy::authenticated().evaluate(&session, &role, "/dashboard"), GuardOutcome::Allow);

    // Directory outage fails closed after the retry budget.
    let down = Identity::new("down@x.com");
    let role = cache.resolve(Some(&down)).await;
    let RoleResolution::Failed(err) = &role else {
        panic!("expected failure, got {role:?}");
    };
    assert_eq!(err.attempts, 2);
}
