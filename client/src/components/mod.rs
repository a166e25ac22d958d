//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session and role contexts provided by `App`;
//! `route_guard` gates dashboard routes, `nav_bar` renders the signed-in
//! chrome shared by every page, and `pager` steps through paged tables.

pub mod nav_bar;
pub mod pager;
pub mod route_guard;
