use axum::{Extension, Json};
use linguadesk_access::PageAction;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::access::PageAccess;
use crate::middleware::auth::CurrentSession;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PortalAccessResponse {
    pub page: String,
    pub action: PageAction,
    pub role: String,
}

/// Confirms the signed-in role may perform the request's action on a page
#[utoipa::path(
    get,
    path = "/api/portal/{path}",
    params(("path" = String, Path, description = "Page path below the portal root, e.g. teacher/homework")),
    responses(
        (status = 200, description = "Access granted", body = PortalAccessResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Role lacks the page permission")
    ),
    tag = "Portal",
    security(("session_cookie" = []))
)]
pub async fn portal_page(
    Extension(access): Extension<PageAccess>,
    Extension(session): Extension<CurrentSession>,
) -> Json<PortalAccessResponse> {
    Json(PortalAccessResponse {
        page: access.path,
        action: access.action,
        role: session.0.user.role,
    })
}
