use anyhow::anyhow;
use linguadesk_access::{Role, RoleRegistry, RoleUpdate};
use linguadesk_core::AppError;
use linguadesk_core::names::roles;

use super::model::{CreateRoleDto, RoleListResponse, UpdateRoleDto};

pub struct RoleService;

impl RoleService {
    pub fn list_roles(registry: &RoleRegistry) -> RoleListResponse {
        let roles = registry.get_all_roles();
        RoleListResponse {
            total: roles.len(),
            roles,
        }
    }

    pub fn get_role(registry: &RoleRegistry, id: &str) -> Result<Role, AppError> {
        registry
            .get_role_definition(id)
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found: {}", id)))
    }

    pub fn create_role(registry: &RoleRegistry, dto: CreateRoleDto) -> Result<Role, AppError> {
        let id = dto.id.clone();
        if !registry.create_role(dto.into()) {
            return Err(AppError::conflict(anyhow!("Role already exists: {}", id)));
        }
        Self::get_role(registry, &id)
    }

    pub fn update_role(
        registry: &RoleRegistry,
        id: &str,
        dto: UpdateRoleDto,
    ) -> Result<Role, AppError> {
        let update = RoleUpdate::from(dto);
        if id == roles::MASTER && update.revokes_special() {
            return Err(AppError::bad_request(anyhow!(
                "The master role keeps every special permission"
            )));
        }
        if !registry.update_role(id, &update) {
            return Err(AppError::not_found(anyhow!("Role not found: {}", id)));
        }
        Self::get_role(registry, id)
    }

    /// Protected built-ins and unknown ids are refused alike.
    pub fn delete_role(registry: &RoleRegistry, id: &str) -> Result<(), AppError> {
        if registry.delete_role(id) {
            Ok(())
        } else {
            Err(AppError::bad_request(anyhow!("Role cannot be deleted: {}", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use linguadesk_access::{PermissionSet, SpecialPermission};

    fn dto(id: &str) -> CreateRoleDto {
        CreateRoleDto {
            id: id.to_string(),
            name: "Receptionist".to_string(),
            description: None,
            permissions: PermissionSet::default(),
        }
    }

    #[test]
    fn test_create_conflict() {
        let registry = RoleRegistry::with_defaults();
        assert!(RoleService::create_role(&registry, dto("receptionist")).is_ok());

        let err = RoleService::create_role(&registry, dto("receptionist")).unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let registry = RoleRegistry::with_defaults();
        let err =
            RoleService::update_role(&registry, "ghost", UpdateRoleDto::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_master_special_permissions_cannot_be_revoked() {
        let registry = RoleRegistry::with_defaults();
        let dto: UpdateRoleDto =
            serde_json::from_value(serde_json::json!({ "special": { "manage_roles": false } }))
                .unwrap();

        let err = RoleService::update_role(&registry, "master", dto).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(registry.check_special_permission("master", SpecialPermission::ManageRoles));

        // With master intact, deleting admin cannot lock out role management.
        RoleService::delete_role(&registry, "admin").unwrap();
        assert!(registry.check_special_permission("master", SpecialPermission::ManageRoles));
    }

    #[test]
    fn test_delete_refusals_are_bad_requests() {
        let registry = RoleRegistry::with_defaults();
        for id in ["master", "ghost"] {
            let err = RoleService::delete_role(&registry, id).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
        assert_eq!(RoleService::list_roles(&registry).total, 5);
    }
}
