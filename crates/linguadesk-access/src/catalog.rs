//! Page and function listings derived from the registry.
//!
//! Only descriptive metadata (description, category) is static here. Which roles
//! may use an entry is always computed from the live permission sets, so a
//! listing can never disagree with [`RoleRegistry::check_page_access`] or
//! [`RoleRegistry::check_function_permission`].

use std::collections::BTreeSet;

use linguadesk_core::names::{WILDCARD, functions, pages};
use serde::Serialize;
use utoipa::ToSchema;

use crate::check::{function_allowed, page_allowed};
use crate::model::PageAction;
use crate::registry::RoleRegistry;

#[derive(Debug, Clone, Copy)]
pub struct EntryInfo {
    pub key: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

const fn entry(key: &'static str, description: &'static str, category: &'static str) -> EntryInfo {
    EntryInfo {
        key,
        description,
        category,
    }
}

pub const PAGES: &[EntryInfo] = &[
    entry(pages::ADMIN_DASHBOARD, "Academy overview dashboard", "admin"),
    entry(pages::ADMIN_USERS, "User accounts", "admin"),
    entry(pages::ADMIN_ROLES, "Roles and permissions", "admin"),
    entry(pages::ADMIN_RESERVATIONS, "All lesson reservations", "admin"),
    entry(pages::ADMIN_PAYMENTS, "Payments and refunds", "admin"),
    entry(pages::ADMIN_POINTS, "Point ledger", "admin"),
    entry(pages::ADMIN_CURRICULUM, "Curriculum design", "admin"),
    entry(pages::ADMIN_ANALYTICS, "Analytics dashboards", "admin"),
    entry(pages::ADMIN_MESSAGES, "Messaging center", "admin"),
    entry(pages::ADMIN_DEVICES, "Tagging devices", "admin"),
    entry(pages::ADMIN_AUTOMATION, "Automation rules", "admin"),
    entry(pages::ADMIN_LOGS, "Audit logs", "admin"),
    entry(pages::ADMIN_SETTINGS, "System settings", "admin"),
    entry(pages::TEACHER_DASHBOARD, "Teacher dashboard", "teacher"),
    entry(pages::TEACHER_SCHEDULE, "Class schedule", "teacher"),
    entry(pages::TEACHER_ATTENDANCE, "Attendance tagging", "teacher"),
    entry(pages::TEACHER_STUDENTS, "Assigned students", "teacher"),
    entry(pages::TEACHER_CURRICULUM, "Curriculum progress", "teacher"),
    entry(pages::TEACHER_HOMEWORK, "Homework assignment and grading", "teacher"),
    entry(pages::TEACHER_MESSAGES, "Messages", "teacher"),
    entry(pages::STAFF_DASHBOARD, "Front desk dashboard", "staff"),
    entry(pages::STAFF_RESERVATIONS, "Reservation desk", "staff"),
    entry(pages::STAFF_PAYMENTS, "Payment processing", "staff"),
    entry(pages::STAFF_POINTS, "Point adjustments", "staff"),
    entry(pages::STAFF_TAGGING, "Check-in tagging", "staff"),
    entry(pages::STAFF_STUDENTS, "Student records", "staff"),
    entry(pages::STAFF_MESSAGES, "Messages", "staff"),
    entry(pages::STUDENT_DASHBOARD, "Student home", "student"),
    entry(pages::STUDENT_RESERVATIONS, "Book and cancel lessons", "student"),
    entry(pages::STUDENT_HOMEWORK, "Homework", "student"),
    entry(pages::STUDENT_POINTS, "Point balance", "student"),
    entry(pages::STUDENT_CURRICULUM, "Learning progress", "student"),
    entry(pages::STUDENT_MESSAGES, "Messages", "student"),
    entry(pages::STUDENT_PROFILE, "Profile", "student"),
];

pub const FUNCTIONS: &[EntryInfo] = &[
    entry(functions::USER_MANAGEMENT, "Create and edit user accounts", "administration"),
    entry(functions::ROLE_MANAGEMENT, "Edit roles and permissions", "administration"),
    entry(functions::SYSTEM_MANAGEMENT, "Change system configuration", "administration"),
    entry(functions::DEVICE_MANAGEMENT, "Register tagging devices", "administration"),
    entry(functions::AUTOMATION_MANAGEMENT, "Configure automation rules", "administration"),
    entry(functions::LOG_VIEW, "Read audit logs", "administration"),
    entry(functions::DATA_EXPORT, "Export records", "administration"),
    entry(functions::RESERVATION_MANAGEMENT, "Manage all reservations", "reservations"),
    entry(functions::RESERVATION_BOOKING, "Book own lessons", "reservations"),
    entry(functions::PAYMENT_PROCESSING, "Take payments and refunds", "payments"),
    entry(functions::PAYMENT_HISTORY, "View payment history", "payments"),
    entry(functions::POINT_MANAGEMENT, "Grant and deduct points", "points"),
    entry(functions::POINT_VIEW, "View point balances", "points"),
    entry(functions::ATTENDANCE_TAGGING, "Tag attendance", "attendance"),
    entry(functions::ATTENDANCE_VIEW, "View attendance", "attendance"),
    entry(functions::CURRICULUM_MANAGEMENT, "Edit curricula", "curriculum"),
    entry(functions::CURRICULUM_VIEW, "View curriculum progress", "curriculum"),
    entry(functions::HOMEWORK_ASSIGNMENT, "Assign homework", "curriculum"),
    entry(functions::HOMEWORK_GRADING, "Grade homework", "curriculum"),
    entry(functions::HOMEWORK_SUBMISSION, "Submit homework", "curriculum"),
    entry(functions::MESSAGING, "Send messages", "communication"),
    entry(functions::ANALYTICS_VIEW, "View analytics", "reporting"),
];

const CUSTOM_CATEGORY: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageDescriptor {
    pub path: String,
    pub description: String,
    pub category: String,
    pub allowed_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub category: String,
    pub allowed_roles: Vec<String>,
}

fn lookup(table: &[EntryInfo], key: &str) -> (String, String) {
    table
        .iter()
        .find(|info| info.key == key)
        .map(|info| (info.description.to_string(), info.category.to_string()))
        .unwrap_or_else(|| (key.to_string(), CUSTOM_CATEGORY.to_string()))
}

impl RoleRegistry {
    /// Static pages plus every concrete page key any role mentions.
    pub fn known_pages(&self) -> Vec<String> {
        let roles = self.read();
        let mut keys: BTreeSet<String> = PAGES.iter().map(|info| info.key.to_string()).collect();
        for role in roles.values() {
            keys.extend(
                role.permissions
                    .pages
                    .keys()
                    .filter(|key| key.as_str() != WILDCARD)
                    .cloned(),
            );
        }
        keys.into_iter().collect()
    }

    /// Static functions plus every concrete function key any role mentions.
    pub fn known_functions(&self) -> Vec<String> {
        let roles = self.read();
        let mut keys: BTreeSet<String> =
            FUNCTIONS.iter().map(|info| info.key.to_string()).collect();
        for role in roles.values() {
            keys.extend(
                role.permissions
                    .functions
                    .keys()
                    .filter(|key| key.as_str() != WILDCARD)
                    .cloned(),
            );
        }
        keys.into_iter().collect()
    }

    /// Every known page with the roles that can read it.
    pub fn page_catalog(&self) -> Vec<PageDescriptor> {
        let paths = self.known_pages();
        let roles = self.read();

        paths
            .into_iter()
            .map(|path| {
                let allowed_roles = roles
                    .values()
                    .filter(|role| {
                        page_allowed(&role.id, Some(&role.permissions), &path, PageAction::Read)
                    })
                    .map(|role| role.id.clone())
                    .collect();
                let (description, category) = lookup(PAGES, &path);
                PageDescriptor {
                    path,
                    description,
                    category,
                    allowed_roles,
                }
            })
            .collect()
    }

    /// Every known function with the roles allowed to use it.
    pub fn function_catalog(&self) -> Vec<FunctionDescriptor> {
        let names = self.known_functions();
        let roles = self.read();

        names
            .into_iter()
            .map(|name| {
                let allowed_roles = roles
                    .values()
                    .filter(|role| function_allowed(&role.id, Some(&role.permissions), &name))
                    .map(|role| role.id.clone())
                    .collect();
                let (description, category) = lookup(FUNCTIONS, &name);
                FunctionDescriptor {
                    name,
                    description,
                    category,
                    allowed_roles,
                }
            })
            .collect()
    }

    /// Pages `role` may read.
    pub fn get_accessible_pages(&self, role: &str) -> Vec<PageDescriptor> {
        self.page_catalog()
            .into_iter()
            .filter(|page| self.check_page_access(role, &page.path, PageAction::Read))
            .collect()
    }

    /// Functions `role` may use.
    pub fn get_accessible_functions(&self, role: &str) -> Vec<FunctionDescriptor> {
        self.function_catalog()
            .into_iter()
            .filter(|function| self.check_function_permission(role, &function.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PagePermission, PermissionSet, RoleDefinition};
    use linguadesk_core::names::roles;

    #[test]
    fn test_static_tables_have_unique_keys() {
        let pages: BTreeSet<_> = PAGES.iter().map(|info| info.key).collect();
        let functions: BTreeSet<_> = FUNCTIONS.iter().map(|info| info.key).collect();
        assert_eq!(pages.len(), PAGES.len());
        assert_eq!(functions.len(), FUNCTIONS.len());
    }

    #[test]
    fn test_accessible_pages_match_enforcement() {
        let registry = RoleRegistry::with_defaults();
        for role in registry.role_ids() {
            let accessible: Vec<String> = registry
                .get_accessible_pages(&role)
                .into_iter()
                .map(|page| page.path)
                .collect();
            for path in registry.known_pages() {
                assert_eq!(
                    accessible.contains(&path),
                    registry.check_page_access(&role, &path, PageAction::Read),
                    "{role} {path}"
                );
            }
        }
    }

    #[test]
    fn test_accessible_functions_match_enforcement() {
        let registry = RoleRegistry::with_defaults();
        for role in registry.role_ids() {
            let accessible: Vec<String> = registry
                .get_accessible_functions(&role)
                .into_iter()
                .map(|function| function.name)
                .collect();
            for name in registry.known_functions() {
                assert_eq!(
                    accessible.contains(&name),
                    registry.check_function_permission(&role, &name),
                    "{role} {name}"
                );
            }
        }
    }

    #[test]
    fn test_student_sees_only_student_portal() {
        let registry = RoleRegistry::with_defaults();
        let pages = registry.get_accessible_pages(roles::STUDENT);
        assert!(!pages.is_empty());
        assert!(pages.iter().all(|page| page.path.starts_with("/student")));
    }

    #[test]
    fn test_superusers_see_everything() {
        let registry = RoleRegistry::with_defaults();
        assert_eq!(
            registry.get_accessible_pages(roles::ADMIN).len(),
            registry.known_pages().len()
        );
        assert_eq!(
            registry.get_accessible_functions(roles::MASTER).len(),
            registry.known_functions().len()
        );
    }

    #[test]
    fn test_catalog_allowed_roles_are_derived() {
        let registry = RoleRegistry::with_defaults();
        let homework = registry
            .function_catalog()
            .into_iter()
            .find(|f| f.name == functions::HOMEWORK_SUBMISSION)
            .unwrap();
        assert_eq!(homework.allowed_roles, vec!["admin", "master", "student"]);
        assert_eq!(homework.category, "curriculum");
    }

    #[test]
    fn test_custom_role_pages_join_the_catalog() {
        let registry = RoleRegistry::with_defaults();
        let mut permissions = PermissionSet::default();
        permissions
            .pages
            .insert("/parent/reports".to_string(), PagePermission::READ_ONLY);
        registry.create_role(RoleDefinition {
            id: "parent".to_string(),
            name: "Parent".to_string(),
            description: None,
            permissions,
        });

        let page = registry
            .page_catalog()
            .into_iter()
            .find(|page| page.path == "/parent/reports")
            .unwrap();
        assert_eq!(page.category, "custom");
        assert_eq!(page.allowed_roles, vec!["admin", "master", "parent"]);

        let parent_pages = registry.get_accessible_pages("parent");
        assert_eq!(parent_pages.len(), 1);
    }

    #[test]
    fn test_unknown_role_has_nothing() {
        let registry = RoleRegistry::with_defaults();
        assert!(registry.get_accessible_pages("nobody").is_empty());
        assert!(registry.get_accessible_functions("nobody").is_empty());
    }
}
