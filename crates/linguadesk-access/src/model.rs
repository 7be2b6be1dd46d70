//! Role and permission data model.
//!
//! A [`Role`] owns one [`PermissionSet`], which bundles four kinds of grants:
//!
//! - `pages`: page path -> [`PagePermission`] (read/write/delete/admin)
//! - `functions`: function name -> allowed
//! - `data_access`: fixed [`DataCategory`] flags
//! - `special`: fixed [`SpecialPermission`] flags
//!
//! The `"*"` key in `pages` and `functions` is a wildcard consulted when no
//! specific entry exists.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Returned when a flag, action, or category name does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Action requested against a page.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    #[default]
    Read,
    Write,
    Delete,
    Admin,
}

impl PageAction {
    pub const ALL: [PageAction; 4] = [
        PageAction::Read,
        PageAction::Write,
        PageAction::Delete,
        PageAction::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageAction::Read => "read",
            PageAction::Write => "write",
            PageAction::Delete => "delete",
            PageAction::Admin => "admin",
        }
    }
}

impl FromStr for PageAction {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(PageAction::Read),
            "write" => Ok(PageAction::Write),
            "delete" => Ok(PageAction::Delete),
            "admin" => Ok(PageAction::Admin),
            _ => Err(UnknownName {
                kind: "page action",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD flags for a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PagePermission {
    pub read: bool,
    pub write: bool,
    pub delete: bool,
    pub admin: bool,
}

impl PagePermission {
    pub const NONE: Self = Self {
        read: false,
        write: false,
        delete: false,
        admin: false,
    };

    pub const READ_ONLY: Self = Self {
        read: true,
        ..Self::NONE
    };

    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
        ..Self::NONE
    };

    pub const EDIT: Self = Self {
        read: true,
        write: true,
        delete: true,
        admin: false,
    };

    pub const FULL: Self = Self {
        read: true,
        write: true,
        delete: true,
        admin: true,
    };

    pub fn allows(&self, action: PageAction) -> bool {
        match action {
            PageAction::Read => self.read,
            PageAction::Write => self.write,
            PageAction::Delete => self.delete,
            PageAction::Admin => self.admin,
        }
    }
}

/// Generates a fixed set of named boolean flags: the flag struct, an enum naming
/// each flag, and a partial-update struct with one `Option<bool>` per flag.
macro_rules! flag_set {
    (
        $(#[$set_meta:meta])*
        $set:ident, $update:ident, $flag:ident, $kind:literal {
            $( $(#[$field_meta:meta])* $field:ident => $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$set_meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(default)]
        pub struct $set {
            $( $(#[$field_meta])* pub $field: bool, )+
        }

        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $flag {
            $( $variant, )+
        }

        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(default)]
        pub struct $update {
            $( pub $field: Option<bool>, )+
        }

        impl $set {
            pub const fn all() -> Self {
                Self { $( $field: true, )+ }
            }

            pub fn get(&self, flag: $flag) -> bool {
                match flag {
                    $( $flag::$variant => self.$field, )+
                }
            }

            pub fn set(&mut self, flag: $flag, value: bool) {
                match flag {
                    $( $flag::$variant => self.$field = value, )+
                }
            }

            /// Flags that are currently granted, in declaration order.
            pub fn granted(&self) -> Vec<$flag> {
                $flag::ALL.iter().copied().filter(|flag| self.get(*flag)).collect()
            }

            /// Overwrites only the flags present in `update`.
            pub fn apply(&mut self, update: &$update) {
                $(
                    if let Some(value) = update.$field {
                        self.$field = value;
                    }
                )+
            }
        }

        impl $update {
            pub fn get(&self, flag: $flag) -> Option<bool> {
                match flag {
                    $( $flag::$variant => self.$field, )+
                }
            }
        }

        impl $flag {
            pub const ALL: &'static [$flag] = &[ $( $flag::$variant, )+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $flag::$variant => stringify!($field), )+
                }
            }
        }

        impl FromStr for $flag {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($field) => Ok($flag::$variant), )+
                    _ => Err(UnknownName { kind: $kind, name: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $flag {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

flag_set! {
    /// Which categories of records a role may read.
    DataAccess, DataAccessUpdate, DataCategory, "data category" {
        /// The user's own records
        own => Own,
        students => Students,
        teachers => Teachers,
        staff => Staff,
        /// System-wide configuration and logs
        system => System,
        curriculum => Curriculum,
        analytics => Analytics,
        automation => Automation,
    }
}

flag_set! {
    /// Administrative capabilities outside the page/function model.
    SpecialPermissions, SpecialPermissionsUpdate, SpecialPermission, "special permission" {
        create_users => CreateUsers,
        delete_users => DeleteUsers,
        manage_roles => ManageRoles,
        view_logs => ViewLogs,
        manage_devices => ManageDevices,
        export_data => ExportData,
        manage_settings => ManageSettings,
    }
}

/// Everything a role is allowed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PermissionSet {
    pub pages: BTreeMap<String, PagePermission>,
    pub functions: BTreeMap<String, bool>,
    pub data_access: DataAccess,
    pub special: SpecialPermissions,
}

impl PermissionSet {
    pub fn page(&self, path: &str) -> Option<&PagePermission> {
        self.pages.get(path)
    }

    pub fn function(&self, name: &str) -> Option<bool> {
        self.functions.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::RoleRegistry::create_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

/// Partial update for [`crate::RoleRegistry::update_role`].
///
/// `pages` and `functions` entries are upserted key by key; entries listed in
/// `remove_pages`/`remove_functions` are dropped. Flag groups change only the
/// flags that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub pages: BTreeMap<String, PagePermission>,
    pub remove_pages: Vec<String>,
    pub functions: BTreeMap<String, bool>,
    pub remove_functions: Vec<String>,
    pub data_access: Option<DataAccessUpdate>,
    pub special: Option<SpecialPermissionsUpdate>,
}

impl RoleUpdate {
    /// Whether the update switches off any special permission.
    pub fn revokes_special(&self) -> bool {
        self.special.as_ref().is_some_and(|special| {
            SpecialPermission::ALL
                .iter()
                .any(|flag| special.get(*flag) == Some(false))
        })
    }

    /// Merges this update into `role`. Timestamps are the caller's concern.
    pub fn apply_to(&self, role: &mut Role) {
        if let Some(name) = &self.name {
            role.name = name.clone();
        }
        if let Some(description) = &self.description {
            role.description = Some(description.clone());
        }

        let permissions = &mut role.permissions;
        for path in &self.remove_pages {
            permissions.pages.remove(path);
        }
        for (path, page) in &self.pages {
            permissions.pages.insert(path.clone(), *page);
        }
        for name in &self.remove_functions {
            permissions.functions.remove(name);
        }
        for (name, allowed) in &self.functions {
            permissions.functions.insert(name.clone(), *allowed);
        }
        if let Some(update) = &self.data_access {
            permissions.data_access.apply(update);
        }
        if let Some(update) = &self.special {
            permissions.special.apply(update);
        }
    }
}
