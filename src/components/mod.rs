//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the back-office chrome and the session gate around
//! protected routes, reading the confirmed user from Leptos context.

pub mod app_shell;
pub mod require_session;
