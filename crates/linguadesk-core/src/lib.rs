//! # Linguadesk Core
//!
//! Foundational types shared by every Linguadesk crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`names`]: Well-known role identifiers, page paths, and function names
//!
//! # Example
//!
//! ```ignore
//! use linguadesk_core::errors::AppError;
//! use linguadesk_core::names::{roles, functions};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Role not found"));
//! assert_eq!(roles::STUDENT, "student");
//! assert_eq!(functions::HOMEWORK_SUBMISSION, "homework_submission");
//! ```

pub mod errors;
pub mod names;

pub use errors::AppError;
