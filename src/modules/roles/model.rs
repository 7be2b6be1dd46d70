use std::collections::BTreeMap;

use linguadesk_access::{
    DataAccessUpdate, PagePermission, PermissionSet, Role, RoleDefinition, RoleUpdate,
    SpecialPermissionsUpdate,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Role ids are lowercase identifiers: `a-z`, `0-9`, `_`, starting with a letter.
pub fn validate_role_id(id: &str) -> Result<(), ValidationError> {
    let mut chars = id.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_valid = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if starts_with_letter && rest_valid {
        Ok(())
    } else {
        Err(ValidationError::new("role_id").with_message(
            "id must start with a lowercase letter and contain only a-z, 0-9, _".into(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(
        length(min = 1, max = 64, message = "id must be 1-64 characters"),
        custom(function = "validate_role_id")
    )]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub permissions: PermissionSet,
}

impl From<CreateRoleDto> for RoleDefinition {
    fn from(dto: CreateRoleDto) -> Self {
        RoleDefinition {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            permissions: dto.permissions,
        }
    }
}

/// Partial update. Page and function entries are merged key by key; list keys
/// in `remove_pages` / `remove_functions` to drop them.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateRoleDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    pub pages: BTreeMap<String, PagePermission>,
    pub remove_pages: Vec<String>,
    pub functions: BTreeMap<String, bool>,
    pub remove_functions: Vec<String>,
    pub data_access: Option<DataAccessUpdate>,
    pub special: Option<SpecialPermissionsUpdate>,
}

impl From<UpdateRoleDto> for RoleUpdate {
    fn from(dto: UpdateRoleDto) -> Self {
        RoleUpdate {
            name: dto.name,
            description: dto.description,
            pages: dto.pages,
            remove_pages: dto.remove_pages,
            functions: dto.functions,
            remove_functions: dto.remove_functions,
            data_access: dto.data_access,
            special: dto.special,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleListResponse {
    pub roles: Vec<Role>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
