//! Middleware and extractors for session handling and access control.
//!
//! # Modules
//!
//! - [`auth`]: the [`CurrentSession`](auth::CurrentSession) extractor and
//!   special-permission extractors
//! - [`access`]: the page guard applied to portal routes
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{CurrentSession, RequireManageRoles};
//!
//! // Any signed-in user
//! async fn get_session(CurrentSession(session): CurrentSession) -> impl IntoResponse {
//!     Json(session.user)
//! }
//!
//! // Only roles holding the manage_roles special permission
//! async fn create_role(RequireManageRoles(session): RequireManageRoles) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod access;
pub mod auth;
