//! # backoffice
//!
//! Leptos + WASM manager dashboard for invoicing, sales, receivables,
//! payables, and inventory.
//!
//! Most of this crate is view composition over the REST backend. The part
//! that decides who may see what lives in the `session` crate; this crate
//! wires it to the browser: `localStorage` persistence, `gloo-net` transport,
//! router redirects, and the `RequireSession` guard component.
//!
//! Browser-only code sits behind the `csr` feature. Without it the same
//! modules compile on the host with inert storage and transport stubs, which
//! is how the unit tests run.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and the panic hook, then mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
