use linguadesk_access::RoleRegistry;

use super::model::{AccessCheckRequest, AccessCheckResponse, CheckKind};

pub struct AccessService;

impl AccessService {
    /// Evaluates a validated request for `role`. Unknown data or special names
    /// evaluate to denied.
    pub fn evaluate(
        registry: &RoleRegistry,
        role: &str,
        request: AccessCheckRequest,
    ) -> AccessCheckResponse {
        let (kind, subject, action, allowed) = if let Some(page) = request.page {
            let action = request.action.unwrap_or_default();
            let allowed = registry.check_page_access(role, &page, action);
            (CheckKind::Page, page, Some(action), allowed)
        } else if let Some(function) = request.function {
            let allowed = registry.check_function_permission(role, &function);
            (CheckKind::Function, function, None, allowed)
        } else if let Some(data) = request.data {
            let allowed = registry.check_data_access_named(role, &data);
            (CheckKind::Data, data, None, allowed)
        } else {
            let special = request.special.unwrap_or_default();
            let allowed = registry.check_special_permission_named(role, &special);
            (CheckKind::Special, special, None, allowed)
        };

        AccessCheckResponse {
            role: role.to_string(),
            kind,
            subject,
            action,
            allowed,
        }
    }
}
