//! Page guard for portal routes.
//!
//! The page path is the request path below `/api/portal`, and the action comes
//! from the method: GET and HEAD read, POST/PUT/PATCH write, DELETE deletes.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use linguadesk_access::PageAction;
use linguadesk_core::AppError;

use crate::metrics::track_page_guard;
use crate::middleware::auth::CurrentSession;
use crate::security_event;
use crate::state::AppState;

pub const PORTAL_PREFIX: &str = "/api/portal";

/// The page and action the guard allowed, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAccess {
    pub path: String,
    pub action: PageAction,
}

pub fn action_for_method(method: &Method) -> PageAction {
    match *method {
        Method::POST | Method::PUT | Method::PATCH => PageAction::Write,
        Method::DELETE => PageAction::Delete,
        _ => PageAction::Read,
    }
}

/// `/api/portal/teacher/homework` -> `/teacher/homework`. Nested routers may
/// already have stripped the prefix.
pub fn page_path(request_path: &str) -> String {
    let path = request_path
        .strip_prefix(PORTAL_PREFIX)
        .unwrap_or(request_path)
        .trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

pub async fn page_guard(
    State(state): State<AppState>,
    session: CurrentSession,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = page_path(req.uri().path());
    let action = action_for_method(req.method());
    let role = session.role();

    let allowed = state.registry.check_page_access(role, &path, action);
    track_page_guard(allowed, role);

    if !allowed {
        security_event!(
            "page_denied",
            user.id = %session.user_id(),
            user.role = %role,
            page = %path,
            action = %action
        );
        return Err(AppError::forbidden(format!(
            "Access denied. Role {} may not {} {}",
            role, action, path
        )));
    }

    req.extensions_mut().insert(PageAccess { path, action });
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
