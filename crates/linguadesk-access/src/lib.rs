//! # Linguadesk Access
//!
//! Role registry and access checks for the Linguadesk portals.
//!
//! - [`model`]: roles, permission sets, and flag enums
//! - [`registry`]: the in-memory [`RoleRegistry`] and its create/update/delete API
//! - [`check`]: page, function, data, and special-permission checks
//! - [`catalog`]: page and function listings derived from the registry
//! - [`defaults`]: the built-in master, admin, teacher, staff, and student roles
//!
//! # Example
//!
//! ```
//! use linguadesk_access::{PageAction, RoleRegistry};
//!
//! let registry = RoleRegistry::with_defaults();
//!
//! assert!(registry.check_function_permission("student", "homework_submission"));
//! assert!(!registry.check_function_permission("student", "system_management"));
//! assert!(registry.check_page_access("admin", "/anything", PageAction::Delete));
//! assert!(!registry.delete_role("teacher"));
//! ```

pub mod catalog;
pub mod check;
pub mod defaults;
pub mod model;
pub mod registry;

pub use catalog::{FunctionDescriptor, PageDescriptor};
pub use model::{
    DataAccess, DataAccessUpdate, DataCategory, PageAction, PagePermission, PermissionSet, Role,
    RoleDefinition, RoleUpdate, SpecialPermission, SpecialPermissions, SpecialPermissionsUpdate,
    UnknownName,
};
pub use registry::RoleRegistry;
