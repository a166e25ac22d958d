//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Dashboard pages wrap their content in `RouteGuard` with
//! the policy registered for their route pattern.

pub mod dashboard;
pub mod forbidden;
pub mod home;
pub mod login;
pub mod public;
