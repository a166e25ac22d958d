//! Browser localStorage helpers for the persisted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize browser-only read/write behavior so session code
//! can persist JSON values without repeating web-sys glue. In native builds
//! (tests) every read misses and every write is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("localStorage write failed for {key}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from `localStorage`.
pub fn remove(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
