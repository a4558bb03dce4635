//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The login page is public; every other page is mounted behind
//! `RequireSession` and `AppShell` by the router in `app`.

pub mod dashboard;
pub mod login;
pub mod section;
