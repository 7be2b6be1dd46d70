//! Shared helpers.
//!
//! - [`tracing`]: span helpers and the `audit_event!` / `security_event!` macros

pub mod tracing;
