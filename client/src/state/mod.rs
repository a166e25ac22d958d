//! Shared client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the signed-in session and its persistence; `roles` drives role
//! lookups whenever the session identity changes. Both are exposed to the tree
//! as `RwSignal` contexts provided by `App`. `donations` loads the paged
//! request listings behind the donation tables.

pub mod auth;
pub mod donations;
pub mod roles;
