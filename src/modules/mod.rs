//! Feature modules. Each one has a `router.rs` wiring its `controller.rs`
//! handlers, with request/response types in `model.rs`.

pub mod access;
pub mod auth;
pub mod catalog;
pub mod portal;
pub mod roles;
