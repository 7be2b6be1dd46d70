//! # Linguadesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cognito`]: hosted identity provider (OAuth2 authorization code flow)
//! - [`session`]: `auth-session` cookie settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address and deployment environment
//!
//! # Example
//!
//! ```ignore
//! use linguadesk_config::{CognitoConfig, CorsConfig, ServerConfig, SessionConfig};
//!
//! let server = ServerConfig::from_env();
//! let cognito = CognitoConfig::from_env()?;
//! let session = SessionConfig::from_env(&server)?;
//! let cors = CorsConfig::from_env();
//! ```

pub mod cognito;
pub mod cors;
pub mod server;
pub mod session;

use std::env;

pub use cognito::CognitoConfig;
pub use cors::CorsConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
