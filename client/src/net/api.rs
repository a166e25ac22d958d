//! REST API helpers for the role directory and identity provider.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Role lookups map every failure to a `DirectoryError` so the resolver's
//! retry budget can classify it. Sign-in failures become user-facing strings.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use access::capability::DonationStatus;
use access::pagination::Page;
use access::{DirectoryError, Identity, Role, RoleDirectory, SessionState};
use leptos::prelude::*;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "https://scarlet-aid-server.vercel.app";

/// REST backend base URL, overridable at build time.
pub const API_BASE_URL: &str = match option_env!("SCARLET_API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// Identity provider web API key, supplied at build time.
pub const IDENTITY_API_KEY: Option<&str> = option_env!("SCARLET_IDENTITY_API_KEY");

#[cfg(any(test, feature = "csr"))]
const IDENTITY_SIGN_IN_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";

pub fn role_endpoint(base_url: &str) -> String {
    format!("{}/users/role", base_url.trim_end_matches('/'))
}

#[cfg(any(test, feature = "csr"))]
fn sign_in_endpoint(api_key: &str) -> String {
    format!("{IDENTITY_SIGN_IN_URL}?key={api_key}")
}

/// Map the identity provider's error code to a message for the login form.
#[cfg(any(test, feature = "csr"))]
fn sign_in_failed_message(code: &str) -> String {
    let code = code.split(':').next().unwrap_or(code).trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password.".to_owned()
        }
        "USER_DISABLED" => "This account has been disabled.".to_owned(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
struct RoleResponse {
    role: String,
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
}

#[cfg(any(test, feature = "csr"))]
impl SignInResponse {
    fn into_identity(self) -> Identity {
        let mut identity = Identity::new(self.email).with_access_token(self.id_token);
        identity.display_name = self.display_name.filter(|name| !name.trim().is_empty());
        identity
    }
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// Role directory reached over the REST backend from the browser.
///
/// The bearer token is read from the session on every call so the cache can
/// outlive sign-in changes.
pub struct BrowserRoleDirectory {
    endpoint: String,
    session: RwSignal<SessionState>,
}

impl BrowserRoleDirectory {
    pub fn new(base_url: &str, session: RwSignal<SessionState>) -> Self {
        Self { endpoint: role_endpoint(base_url), session }
    }

    fn access_token(&self) -> Option<String> {
        self.session
            .with_untracked(|state| state.identity().and_then(|id| id.access_token.clone()))
    }
}

#[async_trait::async_trait(?Send)]
impl RoleDirectory for BrowserRoleDirectory {
    async fn lookup_role(&self, key: &str) -> Result<Role, DirectoryError> {
        #[cfg(feature = "csr")]
        {
            let mut request = gloo_net::http::Request::get(&self.endpoint).query([("key", key)]);
            if let Some(token) = self.access_token() {
                request = request.header("Authorization", &format!("Bearer {token}"));
            }
            let resp = request
                .send()
                .await
                .map_err(|e| DirectoryError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(DirectoryError::from_status(resp.status()));
            }
            let body: RoleResponse = resp.json().await.map_err(|e| DirectoryError::Decode(e.to_string()))?;
            Ok(body.role.parse::<Role>()?)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, self.access_token(), &self.endpoint);
            Err(DirectoryError::Transport("not available outside the browser".to_owned()))
        }
    }
}

/// Sign in with email and password at the identity provider.
///
/// # Errors
///
/// Returns a user-facing message if the provider is not configured, the
/// request fails, or the credentials are rejected.
pub async fn sign_in_with_password(email: &str, password: &str) -> Result<Identity, String> {
    let Some(api_key) = IDENTITY_API_KEY else {
        return Err("Sign-in is not configured.".to_owned());
    };
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
        let resp = gloo_net::http::Request::post(&sign_in_endpoint(api_key))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let code = match resp.json::<ProviderErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => resp.status().to_string(),
            };
            return Err(sign_in_failed_message(&code));
        }
        let body: SignInResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_identity())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_key, email, password);
        Err("not available outside the browser".to_owned())
    }
}

/// Which donation-request listing a table shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DonationFeed {
    /// Pending requests anyone can answer, no token required.
    Public,
    /// Every request, for volunteers and admins.
    All,
}

/// One row of a donation-request listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestRow {
    #[serde(rename = "_id")]
    pub id: String,
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_district: String,
    #[serde(default)]
    pub recipient_upazila: String,
    #[serde(default)]
    pub donation_date: String,
    #[serde(default)]
    pub donation_time: String,
    #[serde(default)]
    pub blood_group: String,
    pub status: DonationStatus,
}

impl DonationRequestRow {
    pub fn location(&self) -> String {
        match (self.recipient_upazila.trim(), self.recipient_district.trim()) {
            ("", district) => district.to_owned(),
            (upazila, "") => upazila.to_owned(),
            (upazila, district) => format!("{upazila}, {district}"),
        }
    }
}

/// A page of requests plus whatever paging hint the backend sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestList {
    #[serde(default)]
    pub requests: Vec<DonationRequestRow>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl DonationRequestList {
    /// Page count, preferring the backend's `totalPages` over a row total.
    pub fn page_count(&self, page: Page) -> u32 {
        match (self.total_pages, self.total) {
            (Some(pages), _) => pages.max(1),
            (None, Some(total)) => page.total_pages(total),
            (None, None) => page.number(),
        }
    }
}

pub fn donation_requests_url(base_url: &str, feed: DonationFeed) -> String {
    let base = base_url.trim_end_matches('/');
    match feed {
        DonationFeed::Public => format!("{base}/donation-requests/public"),
        DonationFeed::All => format!("{base}/donation-requests"),
    }
}

/// Query pairs for one page of `feed`.
pub fn donation_requests_query(feed: DonationFeed, page: Page) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.number().to_string()), ("limit", page.limit().to_string())];
    if feed == DonationFeed::Public {
        query.push(("status", "pending".to_owned()));
    }
    query
}

/// Fetch one page of donation requests.
///
/// # Errors
///
/// Returns a user-facing message if the request fails or the body does not
/// decode.
pub async fn fetch_donation_requests(
    feed: DonationFeed,
    page: Page,
    access_token: Option<String>,
) -> Result<DonationRequestList, String> {
    let url = donation_requests_url(API_BASE_URL, feed);
    let query = donation_requests_query(feed, page);
    #[cfg(feature = "csr")]
    {
        let mut request = gloo_net::http::Request::get(&url)
            .query(query.iter().map(|(name, value)| (*name, value.as_str())));
        if let Some(token) = access_token.filter(|_| feed == DonationFeed::All) {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = request.send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("Could not load donation requests ({}).", resp.status()));
        }
        resp.json::<DonationRequestList>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (url, query, access_token);
        Err("not available outside the browser".to_owned())
    }
}
