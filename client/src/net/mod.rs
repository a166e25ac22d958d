//! Networking modules for the ScarletAid REST backend and identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the role directory used by the resolver and the password
//! sign-in call made by the login page.

pub mod api;
