//! # Linguadesk CLI
//!
//! Offline inspection of the built-in role table.
//!
//! Every command works on a freshly constructed default registry, so the output
//! reflects the roles a new server instance starts with.
//!
//! ## Usage
//!
//! ```ignore
//! use linguadesk_access::RoleRegistry;
//! use linguadesk_cli::report::{self, Query};
//!
//! let registry = RoleRegistry::with_defaults();
//! println!("{}", report::roles_table(&registry));
//! let allowed = report::evaluate(&registry, "teacher", &Query::Function("messaging".into()))?;
//! ```

pub mod report;
