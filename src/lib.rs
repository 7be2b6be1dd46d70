//! # Linguadesk API
//!
//! Access-control and session backbone for the Linguadesk language-school
//! portals (admin, teacher, staff, student).
//!
//! ## Overview
//!
//! - **Role Registry**: built-in master, admin, teacher, staff, and student roles
//!   plus admin-defined custom roles, each holding page, function, data, and
//!   special permissions ([`linguadesk_access`])
//! - **Access checks**: deny-by-default lookups, with master and admin bypassing
//!   page and function checks
//! - **Sessions**: hosted-UI login through the OAuth2 authorization code flow,
//!   kept in a signed `auth-session` cookie ([`linguadesk_auth`])
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractor, special-permission extractors, page guard
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, callback, logout, session
//! │   ├── roles/       # Role registry management
//! │   ├── access/      # Access checks for the signed-in role
//! │   ├── catalog/     # Known pages and functions
//! │   └── portal/      # Page-guarded portal routes
//! └── utils/           # Tracing helpers and event macros
//! ```
//!
//! Each feature module keeps handlers in `controller.rs`, routes in
//! `router.rs`, and request/response types in `model.rs`; `service.rs` holds
//! logic that maps registry results onto HTTP errors.
//!
//! ## Quick Start
//!
//! ```bash
//! COGNITO_DOMAIN=https://academy.auth.ap-northeast-2.amazoncognito.com
//! COGNITO_CLIENT_ID=portal-client
//! COGNITO_REDIRECT_URI=http://localhost:3000/api/auth/callback
//! ```
//!
//! Swagger UI is served at `http://localhost:3000/swagger-ui`.
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI documentation setup
//! - [`logging`]: Request logging and tracing subscriber setup
//! - [`metrics`]: Prometheus metrics endpoint and counters
//! - [`middleware`]: Session and access-control middleware
//! - [`modules`]: Feature modules
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`utils`]: Tracing helpers
//! - [`validator`]: Request validation

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use linguadesk_access;
pub use linguadesk_auth;
pub use linguadesk_config;
pub use linguadesk_core;
