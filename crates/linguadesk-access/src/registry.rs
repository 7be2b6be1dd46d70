use std::collections::BTreeMap;

use chrono::Utc;
use linguadesk_core::names::roles;
use metrics::counter;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::defaults::builtin_roles;
use crate::model::{PermissionSet, Role, RoleDefinition, RoleUpdate, SpecialPermissions};

/// Process-local table of roles and their permission sets.
///
/// Construct one at startup and share it (`Arc<RoleRegistry>`). Edits made through
/// [`create_role`](Self::create_role), [`update_role`](Self::update_role), and
/// [`delete_role`](Self::delete_role) live only as long as the instance.
#[derive(Debug)]
pub struct RoleRegistry {
    roles: RwLock<BTreeMap<String, Role>>,
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RoleRegistry {
    /// A registry with no roles at all. Every check except the superuser
    /// short-circuit denies.
    pub fn empty() -> Self {
        Self {
            roles: RwLock::new(BTreeMap::new()),
        }
    }

    /// A registry seeded with master, admin, teacher, staff, and student.
    pub fn with_defaults() -> Self {
        Self::from_definitions(builtin_roles())
    }

    /// Seeds a registry from `definitions`. On duplicate ids the first wins.
    pub fn from_definitions(definitions: impl IntoIterator<Item = RoleDefinition>) -> Self {
        let registry = Self::empty();
        for definition in definitions {
            registry.insert(definition);
        }
        registry
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Role>> {
        self.roles.read()
    }

    fn insert(&self, definition: RoleDefinition) -> bool {
        let mut roles = self.roles.write();
        if roles.contains_key(&definition.id) {
            return false;
        }

        let now = Utc::now();
        roles.insert(
            definition.id.clone(),
            Role {
                id: definition.id,
                name: definition.name,
                description: definition.description,
                permissions: definition.permissions,
                created_at: now,
                updated_at: now,
            },
        );
        true
    }

    pub fn get_role(&self, role_id: &str) -> Option<PermissionSet> {
        self.roles
            .read()
            .get(role_id)
            .map(|role| role.permissions.clone())
    }

    pub fn get_role_definition(&self, role_id: &str) -> Option<Role> {
        self.roles.read().get(role_id).cloned()
    }

    /// All roles ordered by id.
    pub fn get_all_roles(&self) -> Vec<Role> {
        self.roles.read().values().cloned().collect()
    }

    pub fn role_ids(&self) -> Vec<String> {
        self.roles.read().keys().cloned().collect()
    }

    pub fn contains(&self, role_id: &str) -> bool {
        self.roles.read().contains_key(role_id)
    }

    pub fn len(&self) -> usize {
        self.roles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.read().is_empty()
    }

    /// Inserts a new role. Returns `false` and leaves the existing entry intact
    /// when the id is already taken.
    pub fn create_role(&self, definition: RoleDefinition) -> bool {
        let role_id = definition.id.clone();
        let created = self.insert(definition);

        if created {
            info!(role = %role_id, "Role created");
        } else {
            warn!(role = %role_id, "Role creation refused: id already exists");
        }
        track_mutation("create", created);
        created
    }

    /// Merges `update` into an existing role and refreshes `updated_at`.
    /// Returns `false` when the role does not exist.
    ///
    /// `master` always keeps every special permission, so role management can
    /// never be locked out.
    pub fn update_role(&self, role_id: &str, update: &RoleUpdate) -> bool {
        let updated = {
            let mut table = self.roles.write();
            match table.get_mut(role_id) {
                Some(role) => {
                    update.apply_to(role);
                    if role.id == roles::MASTER {
                        role.permissions.special = SpecialPermissions::all();
                    }
                    role.updated_at = Utc::now();
                    true
                }
                None => false,
            }
        };

        if updated {
            info!(role = %role_id, "Role updated");
        } else {
            warn!(role = %role_id, "Role update refused: role not found");
        }
        track_mutation("update", updated);
        updated
    }

    /// Removes a role. Built-in master, teacher, staff, and student are never
    /// removed; unknown ids also return `false`.
    pub fn delete_role(&self, role_id: &str) -> bool {
        let deleted = if roles::is_protected(role_id) {
            false
        } else {
            self.roles.write().remove(role_id).is_some()
        };

        if deleted {
            info!(role = %role_id, "Role deleted");
        } else {
            warn!(role = %role_id, "Role deletion refused");
        }
        track_mutation("delete", deleted);
        deleted
    }
}

fn track_mutation(operation: &'static str, success: bool) {
    let outcome = if success { "success" } else { "refused" };
    counter!("role_mutations_total", "operation" => operation, "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DataAccessUpdate, PageAction, PagePermission, SpecialPermission, SpecialPermissionsUpdate,
    };
    use linguadesk_core::names::{functions, pages};

    fn receptionist() -> RoleDefinition {
        let mut permissions = PermissionSet::default();
        permissions
            .pages
            .insert(pages::STAFF_RESERVATIONS.to_string(), PagePermission::READ_ONLY);
        permissions
            .functions
            .insert(functions::RESERVATION_MANAGEMENT.to_string(), true);

        RoleDefinition {
            id: "receptionist".to_string(),
            name: "Receptionist".to_string(),
            description: None,
            permissions,
        }
    }

    #[test]
    fn test_defaults_contain_builtin_roles() {
        let registry = RoleRegistry::with_defaults();
        assert_eq!(
            registry.role_ids(),
            vec!["admin", "master", "staff", "student", "teacher"]
        );
        assert_eq!(registry.len(), 5);
        assert!(RoleRegistry::empty().is_empty());
    }

    #[test]
    fn test_get_role_unknown_is_none() {
        let registry = RoleRegistry::with_defaults();
        assert!(registry.get_role("parent").is_none());
        assert!(registry.get_role(roles::TEACHER).is_some());
    }

    #[test]
    fn test_create_role_sets_timestamps() {
        let registry = RoleRegistry::with_defaults();
        assert!(registry.create_role(receptionist()));

        let role = registry.get_role_definition("receptionist").unwrap();
        assert_eq!(role.name, "Receptionist");
        assert_eq!(role.created_at, role.updated_at);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_create_duplicate_role_does_not_overwrite() {
        let registry = RoleRegistry::with_defaults();
        let original = registry.get_role(roles::STUDENT).unwrap();

        let mut impostor = receptionist();
        impostor.id = roles::STUDENT.to_string();
        impostor.name = "Impostor".to_string();

        assert!(!registry.create_role(impostor));
        assert_eq!(registry.get_role(roles::STUDENT).unwrap(), original);
        assert_eq!(
            registry.get_role_definition(roles::STUDENT).unwrap().name,
            "Student"
        );
    }

    #[test]
    fn test_update_unknown_role_fails() {
        let registry = RoleRegistry::with_defaults();
        assert!(!registry.update_role("ghost", &RoleUpdate::default()));
        assert!(!registry.contains("ghost"));
    }

    #[test]
    fn test_update_merges_pages_key_by_key() {
        let registry = RoleRegistry::with_defaults();
        let before = registry.get_role(roles::TEACHER).unwrap();

        let mut update = RoleUpdate::default();
        update
            .pages
            .insert(pages::TEACHER_STUDENTS.to_string(), PagePermission::READ_WRITE);
        assert!(registry.update_role(roles::TEACHER, &update));

        let after = registry.get_role(roles::TEACHER).unwrap();
        assert_eq!(after.pages.len(), before.pages.len());
        assert!(after.pages[pages::TEACHER_STUDENTS].allows(PageAction::Write));
        assert_eq!(
            after.pages[pages::TEACHER_HOMEWORK],
            before.pages[pages::TEACHER_HOMEWORK]
        );
    }

    #[test]
    fn test_update_removes_listed_entries() {
        let registry = RoleRegistry::with_defaults();
        let update = RoleUpdate {
            remove_pages: vec![pages::STUDENT_PROFILE.to_string()],
            remove_functions: vec![functions::MESSAGING.to_string()],
            ..RoleUpdate::default()
        };
        assert!(registry.update_role(roles::STUDENT, &update));

        let after = registry.get_role(roles::STUDENT).unwrap();
        assert!(after.page(pages::STUDENT_PROFILE).is_none());
        assert!(after.function(functions::MESSAGING).is_none());
        assert_eq!(after.function(functions::HOMEWORK_SUBMISSION), Some(true));
    }

    #[test]
    fn test_update_flags_and_metadata() {
        let registry = RoleRegistry::with_defaults();
        let created_at = registry
            .get_role_definition(roles::STAFF)
            .unwrap()
            .created_at;

        let update = RoleUpdate {
            name: Some("Operations".to_string()),
            data_access: Some(DataAccessUpdate {
                analytics: Some(true),
                ..DataAccessUpdate::default()
            }),
            special: Some(SpecialPermissionsUpdate {
                view_logs: Some(true),
                ..SpecialPermissionsUpdate::default()
            }),
            ..RoleUpdate::default()
        };
        assert!(registry.update_role(roles::STAFF, &update));

        let role = registry.get_role_definition(roles::STAFF).unwrap();
        assert_eq!(role.name, "Operations");
        assert!(role.permissions.data_access.analytics);
        assert!(role.permissions.data_access.teachers);
        assert!(role.permissions.special.get(SpecialPermission::ViewLogs));
        assert!(role.permissions.special.get(SpecialPermission::ExportData));
        assert_eq!(role.created_at, created_at);
        assert!(role.updated_at >= created_at);
    }

    #[test]
    fn test_master_keeps_special_permissions_through_updates() {
        let registry = RoleRegistry::with_defaults();
        let update = RoleUpdate {
            name: Some("Owner".to_string()),
            special: Some(SpecialPermissionsUpdate {
                manage_roles: Some(false),
                create_users: Some(false),
                ..SpecialPermissionsUpdate::default()
            }),
            ..RoleUpdate::default()
        };
        assert!(registry.update_role(roles::MASTER, &update));
        assert!(registry.delete_role(roles::ADMIN));

        let master = registry.get_role_definition(roles::MASTER).unwrap();
        assert_eq!(master.name, "Owner");
        assert_eq!(master.permissions.special, SpecialPermissions::all());
        assert!(registry.check_special_permission(roles::MASTER, SpecialPermission::ManageRoles));
    }

    #[test]
    fn test_protected_roles_cannot_be_deleted() {
        let registry = RoleRegistry::with_defaults();
        let before = registry.get_all_roles();

        for role in [roles::TEACHER, roles::MASTER, roles::STAFF, roles::STUDENT] {
            assert!(!registry.delete_role(role), "{role} must be protected");
        }
        assert_eq!(registry.get_all_roles(), before);
    }

    #[test]
    fn test_delete_custom_and_admin_roles() {
        let registry = RoleRegistry::with_defaults();
        registry.create_role(receptionist());

        assert!(registry.delete_role("receptionist"));
        assert!(!registry.contains("receptionist"));
        assert!(!registry.delete_role("receptionist"));

        assert!(registry.delete_role(roles::ADMIN));
        assert!(!registry.contains(roles::ADMIN));
    }

    #[test]
    fn test_from_definitions_first_wins() {
        let mut second = receptionist();
        second.name = "Second".to_string();
        let registry = RoleRegistry::from_definitions([receptionist(), second]);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get_role_definition("receptionist").unwrap().name,
            "Receptionist"
        );
    }
}
