//! Keyed role cache with in-flight de-duplication and a bounded retry budget.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use super::{ResolveError, RoleDirectory, RoleResolution};
use crate::role::Role;
use crate::session::Identity;

pub const DEFAULT_LOOKUP_ATTEMPTS: u32 = 3;

type Lookup = Shared<LocalBoxFuture<'static, Result<Role, ResolveError>>>;

enum Entry {
    Pending(Lookup),
    Ready(Role),
}

/// How many times a retryable directory failure is attempted before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1) }
    }

    #[must_use]
    pub fn max_attempts(self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_ATTEMPTS)
    }
}

/// Shared role cache keyed by identity key.
///
/// Cloning is cheap; clones share entries. Successful roles stay cached until
/// [`RoleCache::invalidate`] or [`RoleCache::clear`]; failures are never cached.
#[derive(Clone)]
pub struct RoleCache {
    inner: Rc<CacheInner>,
}

struct CacheInner {
    directory: Rc<dyn RoleDirectory>,
    retry: RetryPolicy,
    entries: RefCell<HashMap<String, Entry>>,
}

impl RoleCache {
    #[must_use]
    pub fn new(directory: Rc<dyn RoleDirectory>, retry: RetryPolicy) -> Self {
        Self {
            inner: Rc::new(CacheInner { directory, retry, entries: RefCell::new(HashMap::new()) }),
        }
    }

    /// Resolve the role for an identity.
    ///
    /// An absent identity (or one with a blank key) resolves to
    /// [`RoleResolution::Unresolved`] without touching the directory.
    pub async fn resolve(&self, identity: Option<&Identity>) -> RoleResolution {
        match identity.and_then(Identity::lookup_key) {
            Some(key) => self.fetch(key).await.into(),
            None => RoleResolution::Unresolved,
        }
    }

    /// Fetch the role for `key`, joining an in-flight lookup if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the directory lookup fails with a
    /// non-retryable error or the retry budget is exhausted.
    pub async fn fetch(&self, key: &str) -> Result<Role, ResolveError> {
        let lookup = {
            let mut entries = self.inner.entries.borrow_mut();
            let existing = match entries.get(key) {
                Some(Entry::Ready(role)) => return Ok(*role),
                Some(Entry::Pending(lookup)) => Some(lookup.clone()),
                None => None,
            };
            if let Some(lookup) = existing {
                tracing::debug!(key, "joining in-flight role lookup");
                lookup
            } else {
                let lookup = self.start_lookup(key);
                entries.insert(key.to_owned(), Entry::Pending(lookup.clone()));
                lookup
            }
        };

        let result = lookup.clone().await;
        self.settle(key, &lookup, &result);
        result
    }

    /// Cached role for `key`, if a lookup already succeeded.
    #[must_use]
    pub fn cached(&self, key: &str) -> Option<Role> {
        match self.inner.entries.borrow().get(key) {
            Some(Entry::Ready(role)) => Some(*role),
            _ => None,
        }
    }

    /// Forget `key`. An in-flight lookup still completes for its waiters but
    /// its result is not cached.
    pub fn invalidate(&self, key: &str) {
        self.inner.entries.borrow_mut().remove(key);
    }

    /// Forget every entry; used when the session is torn down.
    pub fn clear(&self) {
        self.inner.entries.borrow_mut().clear();
    }

    fn start_lookup(&self, key: &str) -> Lookup {
        let directory = Rc::clone(&self.inner.directory);
        let retry = self.inner.retry;
        let key = key.to_owned();
        tracing::debug!(key = %key, max_attempts = retry.max_attempts, "starting role lookup");
        async move { lookup_with_retry(directory.as_ref(), &key, retry).await }
            .boxed_local()
            .shared()
    }

    fn settle(&self, key: &str, lookup: &Lookup, result: &Result<Role, ResolveError>) {
        let mut entries = self.inner.entries.borrow_mut();
        // Only the lookup that is still registered for this key may settle it.
        let current = matches!(entries.get(key), Some(Entry::Pending(pending)) if pending.ptr_eq(lookup));
        if !current {
            return;
        }
        match result {
            Ok(role) => {
                entries.insert(key.to_owned(), Entry::Ready(*role));
            }
            Err(_) => {
                entries.remove(key);
            }
        }
    }
}

async fn lookup_with_retry(directory: &dyn RoleDirectory, key: &str, retry: RetryPolicy) -> Result<Role, ResolveError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match directory.lookup_role(key).await {
            Ok(role) => {
                tracing::debug!(key, %role, attempt, "role resolved");
                return Ok(role);
            }
            Err(err) if err.retryable() && attempt < retry.max_attempts => {
                tracing::warn!(key, attempt, error = %err, "role lookup failed; retrying");
            }
            Err(cause) => {
                tracing::warn!(key, attempt, error = %cause, "role lookup failed");
                return Err(ResolveError { key: key.to_owned(), attempts: attempt, cause });
            }
        }
    }
}
