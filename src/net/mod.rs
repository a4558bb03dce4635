//! Networking for the two session endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` implements `session::SessionBackend` over `gloo-net`; everything
//! else in the dashboard talks to the backend through views outside this
//! crate's concern.

pub mod http;
