//! Well-known names used across the Linguadesk API.
//!
//! Role identifiers, portal page paths, and function names are plain strings on
//! the wire and in the role registry. Using these constants instead of literals
//! keeps the built-in role tables, the catalog, and the route guards in sync.
//!
//! # Example
//!
//! ```ignore
//! use linguadesk_core::names::{functions, pages, roles};
//!
//! registry.check_function_permission(roles::STUDENT, functions::HOMEWORK_SUBMISSION);
//! registry.check_page_access(roles::TEACHER, pages::TEACHER_ATTENDANCE, PageAction::Write);
//! ```

/// Wildcard key used in page and function permission maps.
pub const WILDCARD: &str = "*";

// =============================================================================
// Roles
// =============================================================================

pub mod roles {
    /// Owner of the deployment, always allowed
    pub const MASTER: &str = "master";
    /// Academy administrator, always allowed
    pub const ADMIN: &str = "admin";
    /// Instructor
    pub const TEACHER: &str = "teacher";
    /// Front-desk and operations staff
    pub const STAFF: &str = "staff";
    /// Enrolled learner
    pub const STUDENT: &str = "student";

    /// Built-in roles that can never be deleted.
    pub const PROTECTED: [&str; 4] = [MASTER, TEACHER, STAFF, STUDENT];

    /// Roles that bypass page and function checks.
    pub const SUPERUSERS: [&str; 2] = [MASTER, ADMIN];

    pub fn is_protected(role: &str) -> bool {
        PROTECTED.contains(&role)
    }

    pub fn is_superuser(role: &str) -> bool {
        SUPERUSERS.contains(&role)
    }
}

// =============================================================================
// Pages
// =============================================================================

pub mod pages {
    // Admin portal
    pub const ADMIN_DASHBOARD: &str = "/admin";
    pub const ADMIN_USERS: &str = "/admin/users";
    pub const ADMIN_ROLES: &str = "/admin/roles";
    pub const ADMIN_RESERVATIONS: &str = "/admin/reservations";
    pub const ADMIN_PAYMENTS: &str = "/admin/payments";
    pub const ADMIN_POINTS: &str = "/admin/points";
    pub const ADMIN_CURRICULUM: &str = "/admin/curriculum";
    pub const ADMIN_ANALYTICS: &str = "/admin/analytics";
    pub const ADMIN_MESSAGES: &str = "/admin/messages";
    pub const ADMIN_DEVICES: &str = "/admin/devices";
    pub const ADMIN_AUTOMATION: &str = "/admin/automation";
    pub const ADMIN_LOGS: &str = "/admin/logs";
    pub const ADMIN_SETTINGS: &str = "/admin/settings";

    // Teacher portal
    pub const TEACHER_DASHBOARD: &str = "/teacher";
    pub const TEACHER_SCHEDULE: &str = "/teacher/schedule";
    pub const TEACHER_ATTENDANCE: &str = "/teacher/attendance";
    pub const TEACHER_STUDENTS: &str = "/teacher/students";
    pub const TEACHER_CURRICULUM: &str = "/teacher/curriculum";
    pub const TEACHER_HOMEWORK: &str = "/teacher/homework";
    pub const TEACHER_MESSAGES: &str = "/teacher/messages";

    // Staff portal
    pub const STAFF_DASHBOARD: &str = "/staff";
    pub const STAFF_RESERVATIONS: &str = "/staff/reservations";
    pub const STAFF_PAYMENTS: &str = "/staff/payments";
    pub const STAFF_POINTS: &str = "/staff/points";
    pub const STAFF_TAGGING: &str = "/staff/tagging";
    pub const STAFF_STUDENTS: &str = "/staff/students";
    pub const STAFF_MESSAGES: &str = "/staff/messages";

    // Student portal
    pub const STUDENT_DASHBOARD: &str = "/student";
    pub const STUDENT_RESERVATIONS: &str = "/student/reservations";
    pub const STUDENT_HOMEWORK: &str = "/student/homework";
    pub const STUDENT_POINTS: &str = "/student/points";
    pub const STUDENT_CURRICULUM: &str = "/student/curriculum";
    pub const STUDENT_MESSAGES: &str = "/student/messages";
    pub const STUDENT_PROFILE: &str = "/student/profile";
}

// =============================================================================
// Functions
// =============================================================================

pub mod functions {
    // Administration
    pub const USER_MANAGEMENT: &str = "user_management";
    pub const ROLE_MANAGEMENT: &str = "role_management";
    pub const SYSTEM_MANAGEMENT: &str = "system_management";
    pub const DEVICE_MANAGEMENT: &str = "device_management";
    pub const AUTOMATION_MANAGEMENT: &str = "automation_management";
    pub const LOG_VIEW: &str = "log_view";
    pub const DATA_EXPORT: &str = "data_export";

    // Reservations
    pub const RESERVATION_MANAGEMENT: &str = "reservation_management";
    pub const RESERVATION_BOOKING: &str = "reservation_booking";

    // Payments and points
    pub const PAYMENT_PROCESSING: &str = "payment_processing";
    pub const PAYMENT_HISTORY: &str = "payment_history";
    pub const POINT_MANAGEMENT: &str = "point_management";
    pub const POINT_VIEW: &str = "point_view";

    // Attendance
    pub const ATTENDANCE_TAGGING: &str = "attendance_tagging";
    pub const ATTENDANCE_VIEW: &str = "attendance_view";

    // Curriculum and homework
    pub const CURRICULUM_MANAGEMENT: &str = "curriculum_management";
    pub const CURRICULUM_VIEW: &str = "curriculum_view";
    pub const HOMEWORK_ASSIGNMENT: &str = "homework_assignment";
    pub const HOMEWORK_GRADING: &str = "homework_grading";
    pub const HOMEWORK_SUBMISSION: &str = "homework_submission";

    // Communication and reporting
    pub const MESSAGING: &str = "messaging";
    pub const ANALYTICS_VIEW: &str = "analytics_view";
}
