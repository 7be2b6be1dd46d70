//! Guarded portal routes. Every request below `/api/portal` passes the page
//! guard before reaching [`controller::portal_page`].

pub mod controller;
pub mod router;
