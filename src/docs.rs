use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use linguadesk_access::{
    DataAccess, DataAccessUpdate, DataCategory, FunctionDescriptor, PageAction, PageDescriptor,
    PagePermission, PermissionSet, Role, SpecialPermission, SpecialPermissions,
    SpecialPermissionsUpdate,
};
use linguadesk_auth::{AuthErrorBody, SessionUser};

use crate::modules::access::model::{
    AccessCheckRequest, AccessCheckResponse, AccessibleFunctionsResponse, AccessiblePagesResponse,
    CheckKind,
};
use crate::modules::auth::model::{LogoutResponse, SessionResponse};
use crate::modules::portal::controller::PortalAccessResponse;
use crate::modules::roles::model::{
    CreateRoleDto, MessageResponse, RoleListResponse, UpdateRoleDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::callback,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::get_session,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::get_role,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::access::controller::get_accessible_pages,
        crate::modules::access::controller::get_accessible_functions,
        crate::modules::access::controller::check_access,
        crate::modules::catalog::controller::get_page_catalog,
        crate::modules::catalog::controller::get_function_catalog,
        crate::modules::portal::controller::portal_page,
    ),
    components(
        schemas(
            Role,
            PermissionSet,
            PagePermission,
            PageAction,
            DataAccess,
            DataAccessUpdate,
            DataCategory,
            SpecialPermissions,
            SpecialPermissionsUpdate,
            SpecialPermission,
            PageDescriptor,
            FunctionDescriptor,
            SessionUser,
            SessionResponse,
            LogoutResponse,
            AuthErrorBody,
            CreateRoleDto,
            UpdateRoleDto,
            RoleListResponse,
            MessageResponse,
            AccessCheckRequest,
            AccessCheckResponse,
            AccessiblePagesResponse,
            AccessibleFunctionsResponse,
            CheckKind,
            PortalAccessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Hosted UI login and the session cookie"),
        (name = "Roles", description = "Role registry management"),
        (name = "Access", description = "Access checks for the signed-in role"),
        (name = "Catalog", description = "Known pages and functions with their allowed roles"),
        (name = "Portal", description = "Page-guarded portal routes")
    ),
    info(
        title = "Linguadesk API",
        version = "0.1.0",
        description = "Role permissions, access checks, and hosted-UI sessions for the Linguadesk portals.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("auth-session"))),
            )
        }
    }
}
