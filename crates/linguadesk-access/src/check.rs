//! Yes/no access questions answered against the registry.
//!
//! Every check denies by default: an unknown role, a missing page or function
//! entry, or an unknown flag name all yield `false`. Master and admin bypass page
//! and function checks; data and special flags are always read from the role.

use linguadesk_core::names::{WILDCARD, roles};
use metrics::counter;
use tracing::debug;

use crate::model::{DataCategory, PageAction, PermissionSet, SpecialPermission};
use crate::registry::RoleRegistry;

/// Page decision for `role_id` holding `permissions` (`None` if the role is unknown).
pub fn page_allowed(
    role_id: &str,
    permissions: Option<&PermissionSet>,
    path: &str,
    action: PageAction,
) -> bool {
    if roles::is_superuser(role_id) {
        return true;
    }

    permissions
        .and_then(|set| set.page(path).or_else(|| set.page(WILDCARD)))
        .is_some_and(|page| page.allows(action))
}

/// Function decision for `role_id` holding `permissions`.
pub fn function_allowed(role_id: &str, permissions: Option<&PermissionSet>, name: &str) -> bool {
    if roles::is_superuser(role_id) {
        return true;
    }

    permissions
        .and_then(|set| set.function(name).or_else(|| set.function(WILDCARD)))
        .unwrap_or(false)
}

fn track_check(kind: &'static str, role: &str, subject: &str, allowed: bool) {
    debug!(kind, role, subject, allowed, "Access check");
    let outcome = if allowed { "allowed" } else { "denied" };
    counter!("access_checks_total", "kind" => kind, "outcome" => outcome).increment(1);
}

impl RoleRegistry {
    pub fn check_page_access(&self, role: &str, path: &str, action: PageAction) -> bool {
        let allowed = {
            let roles = self.read();
            page_allowed(role, roles.get(role).map(|r| &r.permissions), path, action)
        };
        track_check("page", role, path, allowed);
        allowed
    }

    pub fn check_function_permission(&self, role: &str, name: &str) -> bool {
        let allowed = {
            let roles = self.read();
            function_allowed(role, roles.get(role).map(|r| &r.permissions), name)
        };
        track_check("function", role, name, allowed);
        allowed
    }

    pub fn check_data_access(&self, role: &str, category: DataCategory) -> bool {
        let allowed = self
            .read()
            .get(role)
            .is_some_and(|r| r.permissions.data_access.get(category));
        track_check("data", role, category.as_str(), allowed);
        allowed
    }

    pub fn check_special_permission(&self, role: &str, permission: SpecialPermission) -> bool {
        let allowed = self
            .read()
            .get(role)
            .is_some_and(|r| r.permissions.special.get(permission));
        track_check("special", role, permission.as_str(), allowed);
        allowed
    }

    /// Like [`check_data_access`](Self::check_data_access) for a category name;
    /// unknown names deny.
    pub fn check_data_access_named(&self, role: &str, category: &str) -> bool {
        match category.parse::<DataCategory>() {
            Ok(category) => self.check_data_access(role, category),
            Err(_) => {
                track_check("data", role, category, false);
                false
            }
        }
    }

    /// Like [`check_special_permission`](Self::check_special_permission) for a
    /// permission name; unknown names deny.
    pub fn check_special_permission_named(&self, role: &str, permission: &str) -> bool {
        match permission.parse::<SpecialPermission>() {
            Ok(permission) => self.check_special_permission(role, permission),
            Err(_) => {
                track_check("special", role, permission, false);
                false
            }
        }
    }
}
