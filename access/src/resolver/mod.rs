//! Role resolution: identity key -> role via the external directory.
//!
//! ARCHITECTURE
//! ============
//! - [`RoleDirectory`] is the seam to the directory service. The root binary
//!   implements it with `reqwest`, the browser client with `gloo-net`.
//! - [`RoleCache`] de-duplicates lookups per key, applies the retry budget, and
//!   caches successful roles.
//! - [`RoleTracker`] is the reactive view for the current identity. It hands
//!   out generation-stamped tickets so a lookup that finishes after the
//!   identity changed is discarded instead of being attributed to the new user.
//!
//! TRADE-OFFS
//! ==========
//! Everything is single-threaded (`Rc`, `RefCell`, `LocalBoxFuture`) so the
//! same code runs on the wasm event loop and on a native `block_on` executor.

mod cache;
#[cfg(test)]
pub(crate) mod testing;
mod tracker;

pub use cache::{RetryPolicy, RoleCache};
pub use tracker::{LookupTicket, RoleTracker};

use crate::role::{Role, RoleParseError};

/// Errors reported by a [`RoleDirectory`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The request never produced an HTTP response.
    #[error("directory request failed: {0}")]
    Transport(String),
    #[error("directory rejected credentials (401)")]
    Unauthorized,
    #[error("directory denied access (403)")]
    Forbidden,
    #[error("directory returned status {status}")]
    Status { status: u16 },
    #[error("directory response could not be decoded: {0}")]
    Decode(String),
    #[error(transparent)]
    UnknownRole(#[from] RoleParseError),
}

impl DirectoryError {
    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599 })
    }

    /// Map a non-success HTTP status to the matching variant.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            _ => Self::Status { status },
        }
    }
}

/// Directory lookup of a user's role by identity key.
#[async_trait::async_trait(?Send)]
pub trait RoleDirectory {
    async fn lookup_role(&self, key: &str) -> Result<Role, DirectoryError>;
}

/// A lookup that failed after the retry budget was spent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("role lookup for {key} failed after {attempts} attempt(s): {cause}")]
pub struct ResolveError {
    pub key: String,
    pub attempts: u32,
    #[source]
    pub cause: DirectoryError,
}

/// Role state for one identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoleResolution {
    /// No identity, or no lookup started yet.
    #[default]
    Unresolved,
    Resolving,
    Resolved(Role),
    Failed(ResolveError),
}

impl RoleResolution {
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Resolved(role) => Some(*role),
            _ => None,
        }
    }
}

impl From<Result<Role, ResolveError>> for RoleResolution {
    fn from(result: Result<Role, ResolveError>) -> Self {
        match result {
            Ok(role) => Self::Resolved(role),
            Err(err) => Self::Failed(err),
        }
    }
}
