//! Session cookie settings.
//!
//! - `SESSION_MAX_AGE_SECS`: session lifetime (default 604800, 7 days)
//! - `SESSION_SECRET`: key for the session cookie signature; required in
//!   production, a fixed development key otherwise
//! - `Secure` is set on cookies when `ENVIRONMENT=production`

use std::env;
use std::fmt;
use std::time::Duration;

use crate::server::ServerConfig;
use crate::{ConfigError, parsed_or};

pub const SESSION_COOKIE: &str = "auth-session";
pub const STATE_COOKIE: &str = "auth-state";

const SEVEN_DAYS: u64 = 7 * 24 * 60 * 60;
const STATE_TTL: u64 = 10 * 60;
const DEV_SECRET: &str = "linguadesk-dev-session-secret-change-in-production";
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub state_cookie_name: String,
    pub max_age: Duration,
    pub state_max_age: Duration,
    pub secure: bool,
    pub secret: String,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("state_cookie_name", &self.state_cookie_name)
            .field("max_age", &self.max_age)
            .field("state_max_age", &self.state_max_age)
            .field("secure", &self.secure)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: SESSION_COOKIE.to_string(),
            state_cookie_name: STATE_COOKIE.to_string(),
            max_age: Duration::from_secs(SEVEN_DAYS),
            state_max_age: Duration::from_secs(STATE_TTL),
            secure: false,
            secret: DEV_SECRET.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env(server: &ServerConfig) -> Result<Self, ConfigError> {
        let secret = env::var("SESSION_SECRET")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            max_age: Duration::from_secs(parsed_or("SESSION_MAX_AGE_SECS", SEVEN_DAYS)),
            ..Self::for_server(server, secret)?
        })
    }

    /// Settings for `server` signed with `secret`. Production refuses to fall
    /// back to the development key.
    pub fn for_server(server: &ServerConfig, secret: Option<String>) -> Result<Self, ConfigError> {
        let production = server.environment.is_production();
        let secret = match secret {
            Some(secret) if production && secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::Invalid {
                    name: "SESSION_SECRET",
                    reason: format!("must be at least {MIN_SECRET_LEN} characters"),
                });
            }
            Some(secret) => secret,
            None if production => return Err(ConfigError::Missing("SESSION_SECRET")),
            None => DEV_SECRET.to_string(),
        };

        Ok(Self {
            secure: production,
            secret,
            ..Self::default()
        })
    }

    /// Name of the cookie carrying the session value's signature.
    pub fn signature_cookie_name(&self) -> String {
        format!("{}.sig", self.cookie_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::Environment;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "auth-session");
        assert_eq!(config.max_age.as_secs(), 604_800);
        assert!(!config.secure);
    }

    fn production() -> ServerConfig {
        ServerConfig {
            environment: Environment::Production,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_secure_follows_environment() {
        let secret = Some("k".repeat(MIN_SECRET_LEN));
        assert!(SessionConfig::for_server(&production(), secret).unwrap().secure);

        let development = SessionConfig::for_server(&ServerConfig::default(), None).unwrap();
        assert!(!development.secure);
        assert_eq!(development.secret, DEV_SECRET);
    }

    #[test]
    fn test_production_requires_a_real_secret() {
        assert_eq!(
            SessionConfig::for_server(&production(), None),
            Err(ConfigError::Missing("SESSION_SECRET"))
        );
        assert!(matches!(
            SessionConfig::for_server(&production(), Some("short".to_string())),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_secret_is_not_printed() {
        let config = SessionConfig::default();
        assert!(!format!("{config:?}").contains(DEV_SECRET));
        assert_eq!(config.signature_cookie_name(), "auth-session.sig");
    }
}
