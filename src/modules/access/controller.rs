use axum::{Json, extract::State};
use linguadesk_access::SpecialPermission;
use linguadesk_core::AppError;
use tracing::instrument;

use crate::middleware::auth::CurrentSession;
use crate::security_event;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    AccessCheckRequest, AccessCheckResponse, AccessibleFunctionsResponse, AccessiblePagesResponse,
};
use super::service::AccessService;

/// Pages the signed-in role can read
#[utoipa::path(
    get,
    path = "/api/access/pages",
    responses(
        (status = 200, description = "Readable pages", body = AccessiblePagesResponse),
        (status = 401, description = "Not signed in")
    ),
    tag = "Access",
    security(("session_cookie" = []))
)]
pub async fn get_accessible_pages(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Json<AccessiblePagesResponse> {
    let role = session.role().to_string();
    Json(AccessiblePagesResponse {
        pages: state.registry.get_accessible_pages(&role),
        role,
    })
}

/// Functions the signed-in role can use
#[utoipa::path(
    get,
    path = "/api/access/functions",
    responses(
        (status = 200, description = "Usable functions", body = AccessibleFunctionsResponse),
        (status = 401, description = "Not signed in")
    ),
    tag = "Access",
    security(("session_cookie" = []))
)]
pub async fn get_accessible_functions(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Json<AccessibleFunctionsResponse> {
    let role = session.role().to_string();
    Json(AccessibleFunctionsResponse {
        functions: state.registry.get_accessible_functions(&role),
        role,
    })
}

/// Evaluate a single page, function, data, or special check
#[utoipa::path(
    post,
    path = "/api/access/check",
    request_body = AccessCheckRequest,
    responses(
        (status = 200, description = "Check result", body = AccessCheckResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Checking another role requires manage_roles"),
        (status = 422, description = "Not exactly one check given")
    ),
    tag = "Access",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, session, request))]
pub async fn check_access(
    State(state): State<AppState>,
    session: CurrentSession,
    ValidatedJson(mut request): ValidatedJson<AccessCheckRequest>,
) -> Result<Json<AccessCheckResponse>, AppError> {
    let role = match request.role.take() {
        Some(role) if role != session.role() => {
            if !state
                .registry
                .check_special_permission(session.role(), SpecialPermission::ManageRoles)
            {
                security_event!(
                    "foreign_role_check",
                    user.id = %session.user_id(),
                    user.role = %session.role(),
                    target = %role
                );
                return Err(AppError::forbidden(
                    "Access denied. Checking another role requires manage_roles",
                ));
            }
            role
        }
        _ => session.role().to_string(),
    };

    Ok(Json(AccessService::evaluate(&state.registry, &role, request)))
}
