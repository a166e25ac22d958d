//! Role-gated access decisions for the ScarletAid client.
//!
//! This crate owns everything the browser client and the `scarlet-aid` probe
//! share: the closed role model, injected session state, the role resolver
//! (cache + stale-result tracker), the parametrized route guard, the route
//! table, and the small role-scoped capability rules dashboard pages use.
//!
//! Nothing here renders or navigates. Callers feed session and role state in
//! and act on the returned outcomes.

pub mod capability;
pub mod guard;
pub mod pagination;
pub mod resolver;
pub mod role;
pub mod routes;
pub mod session;

pub use guard::{DenyReason, GuardOutcome, GuardPolicy, Redirect, RedirectTarget};
pub use resolver::{DirectoryError, LookupTicket, ResolveError, RetryPolicy, RoleCache, RoleDirectory, RoleResolution, RoleTracker};
pub use role::{Role, RoleParseError, RoleSet};
pub use session::{Identity, SessionState};
