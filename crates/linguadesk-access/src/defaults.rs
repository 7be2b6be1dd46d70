//! Built-in role definitions seeded into every new registry.

use std::collections::BTreeMap;

use linguadesk_core::names::{WILDCARD, functions, pages, roles};

use crate::model::{DataAccess, PagePermission, PermissionSet, RoleDefinition, SpecialPermissions};

fn page_map(entries: &[(&str, PagePermission)]) -> BTreeMap<String, PagePermission> {
    entries
        .iter()
        .map(|(path, permission)| (path.to_string(), *permission))
        .collect()
}

fn function_map(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries
        .iter()
        .map(|(name, allowed)| (name.to_string(), *allowed))
        .collect()
}

fn superuser_permissions() -> PermissionSet {
    PermissionSet {
        pages: page_map(&[(WILDCARD, PagePermission::FULL)]),
        functions: function_map(&[(WILDCARD, true)]),
        data_access: DataAccess::all(),
        special: SpecialPermissions::all(),
    }
}

pub fn master() -> RoleDefinition {
    RoleDefinition {
        id: roles::MASTER.to_string(),
        name: "Master".to_string(),
        description: Some("Owner account with unrestricted access".to_string()),
        permissions: superuser_permissions(),
    }
}

pub fn admin() -> RoleDefinition {
    RoleDefinition {
        id: roles::ADMIN.to_string(),
        name: "Administrator".to_string(),
        description: Some("Academy administrator with unrestricted access".to_string()),
        permissions: superuser_permissions(),
    }
}

pub fn teacher() -> RoleDefinition {
    RoleDefinition {
        id: roles::TEACHER.to_string(),
        name: "Teacher".to_string(),
        description: Some("Runs classes, tracks attendance and curriculum progress".to_string()),
        permissions: PermissionSet {
            pages: page_map(&[
                (pages::TEACHER_DASHBOARD, PagePermission::READ_ONLY),
                (pages::TEACHER_SCHEDULE, PagePermission::READ_ONLY),
                (pages::TEACHER_ATTENDANCE, PagePermission::READ_WRITE),
                (pages::TEACHER_STUDENTS, PagePermission::READ_ONLY),
                (pages::TEACHER_CURRICULUM, PagePermission::READ_WRITE),
                (pages::TEACHER_HOMEWORK, PagePermission::EDIT),
                (pages::TEACHER_MESSAGES, PagePermission::READ_WRITE),
            ]),
            functions: function_map(&[
                (functions::ATTENDANCE_TAGGING, true),
                (functions::ATTENDANCE_VIEW, true),
                (functions::CURRICULUM_VIEW, true),
                (functions::CURRICULUM_MANAGEMENT, false),
                (functions::HOMEWORK_ASSIGNMENT, true),
                (functions::HOMEWORK_GRADING, true),
                (functions::MESSAGING, true),
                (functions::POINT_VIEW, true),
                (functions::RESERVATION_MANAGEMENT, false),
                (functions::SYSTEM_MANAGEMENT, false),
            ]),
            data_access: DataAccess {
                own: true,
                students: true,
                curriculum: true,
                ..DataAccess::default()
            },
            special: SpecialPermissions::default(),
        },
    }
}

pub fn staff() -> RoleDefinition {
    RoleDefinition {
        id: roles::STAFF.to_string(),
        name: "Staff".to_string(),
        description: Some("Front desk: reservations, payments, points, and tagging".to_string()),
        permissions: PermissionSet {
            pages: page_map(&[
                (pages::STAFF_DASHBOARD, PagePermission::READ_ONLY),
                (pages::STAFF_RESERVATIONS, PagePermission::EDIT),
                (pages::STAFF_PAYMENTS, PagePermission::READ_WRITE),
                (pages::STAFF_POINTS, PagePermission::READ_WRITE),
                (pages::STAFF_TAGGING, PagePermission::READ_WRITE),
                (pages::STAFF_STUDENTS, PagePermission::READ_WRITE),
                (pages::STAFF_MESSAGES, PagePermission::READ_WRITE),
            ]),
            functions: function_map(&[
                (functions::RESERVATION_MANAGEMENT, true),
                (functions::PAYMENT_PROCESSING, true),
                (functions::PAYMENT_HISTORY, true),
                (functions::POINT_MANAGEMENT, true),
                (functions::POINT_VIEW, true),
                (functions::ATTENDANCE_TAGGING, true),
                (functions::ATTENDANCE_VIEW, true),
                (functions::MESSAGING, true),
                (functions::DATA_EXPORT, true),
                (functions::USER_MANAGEMENT, false),
                (functions::SYSTEM_MANAGEMENT, false),
            ]),
            data_access: DataAccess {
                own: true,
                students: true,
                teachers: true,
                ..DataAccess::default()
            },
            special: SpecialPermissions {
                export_data: true,
                ..SpecialPermissions::default()
            },
        },
    }
}

pub fn student() -> RoleDefinition {
    RoleDefinition {
        id: roles::STUDENT.to_string(),
        name: "Student".to_string(),
        description: Some("Books lessons, submits homework, tracks points".to_string()),
        permissions: PermissionSet {
            pages: page_map(&[
                (pages::STUDENT_DASHBOARD, PagePermission::READ_ONLY),
                (pages::STUDENT_RESERVATIONS, PagePermission::EDIT),
                (pages::STUDENT_HOMEWORK, PagePermission::READ_WRITE),
                (pages::STUDENT_POINTS, PagePermission::READ_ONLY),
                (pages::STUDENT_CURRICULUM, PagePermission::READ_ONLY),
                (pages::STUDENT_MESSAGES, PagePermission::READ_WRITE),
                (pages::STUDENT_PROFILE, PagePermission::READ_WRITE),
            ]),
            functions: function_map(&[
                (functions::RESERVATION_BOOKING, true),
                (functions::HOMEWORK_SUBMISSION, true),
                (functions::POINT_VIEW, true),
                (functions::CURRICULUM_VIEW, true),
                (functions::PAYMENT_HISTORY, true),
                (functions::MESSAGING, true),
                (functions::SYSTEM_MANAGEMENT, false),
            ]),
            data_access: DataAccess {
                own: true,
                ..DataAccess::default()
            },
            special: SpecialPermissions::default(),
        },
    }
}

/// All built-in roles in seeding order.
pub fn builtin_roles() -> Vec<RoleDefinition> {
    vec![master(), admin(), teacher(), staff(), student()]
}
