//! # client
//!
//! Leptos + WASM frontend for ScarletAid, rendered client-side. Build with
//! `--features csr`; `index.html` loads the generated module.
//!
//! This crate wires the `access` crate's session, role resolver and route
//! guard into reactive contexts, and renders the public pages plus the
//! role-gated dashboard routes behind `RouteGuard`.


pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount `App` into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
