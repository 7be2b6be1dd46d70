use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use linguadesk_access::Role;
use linguadesk_core::AppError;
use tracing::instrument;

use crate::audit_event;
use crate::middleware::auth::{CurrentSession, RequireManageRoles};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateRoleDto, MessageResponse, RoleListResponse, UpdateRoleDto};
use super::service::RoleService;

/// List every role
#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles ordered by id", body = RoleListResponse),
        (status = 401, description = "Not signed in")
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn get_roles(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Json<RoleListResponse> {
    Json(RoleService::list_roles(&state.registry))
}

/// Get a role with its permission set
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role details", body = Role),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn get_role(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(RoleService::get_role(&state.registry, &id)?))
}

/// Create a custom role
#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Missing manage_roles"),
        (status = 409, description = "Role id already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, session, dto))]
pub async fn create_role(
    State(state): State<AppState>,
    RequireManageRoles(session): RequireManageRoles,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = RoleService::create_role(&state.registry, dto)?;
    audit_event!("create", "role", role.id = %role.id, actor = %session.user_id());
    Ok((StatusCode::CREATED, Json(role)))
}

/// Merge changes into an existing role
#[utoipa::path(
    patch,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated role", body = Role),
        (status = 400, description = "Update would revoke a special permission from master"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Missing manage_roles"),
        (status = 404, description = "Role not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, session, dto))]
pub async fn update_role(
    State(state): State<AppState>,
    RequireManageRoles(session): RequireManageRoles,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<Role>, AppError> {
    let role = RoleService::update_role(&state.registry, &id, dto)?;
    audit_event!("update", "role", role.id = %role.id, actor = %session.user_id());
    Ok(Json(role))
}

/// Delete a custom role
///
/// master, teacher, staff, and student are never deleted.
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 400, description = "Role is protected or does not exist"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Missing manage_roles")
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, session))]
pub async fn delete_role(
    State(state): State<AppState>,
    RequireManageRoles(session): RequireManageRoles,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    RoleService::delete_role(&state.registry, &id)?;
    audit_event!("delete", "role", role.id = %id, actor = %session.user_id());
    Ok(Json(MessageResponse {
        message: format!("Role {} deleted", id),
    }))
}
