use axum::{Json, extract::State};
use linguadesk_access::{FunctionDescriptor, PageDescriptor};

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

/// Every known page with the roles that can read it
#[utoipa::path(
    get,
    path = "/api/catalog/pages",
    responses(
        (status = 200, description = "Page catalog", body = Vec<PageDescriptor>),
        (status = 401, description = "Not signed in")
    ),
    tag = "Catalog",
    security(("session_cookie" = []))
)]
pub async fn get_page_catalog(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Json<Vec<PageDescriptor>> {
    Json(state.registry.page_catalog())
}

/// Every known function with the roles that can use it
#[utoipa::path(
    get,
    path = "/api/catalog/functions",
    responses(
        (status = 200, description = "Function catalog", body = Vec<FunctionDescriptor>),
        (status = 401, description = "Not signed in")
    ),
    tag = "Catalog",
    security(("session_cookie" = []))
)]
pub async fn get_function_catalog(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Json<Vec<FunctionDescriptor>> {
    Json(state.registry.function_catalog())
}
