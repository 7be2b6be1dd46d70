//! Hosted identity provider settings.
//!
//! # Environment Variables
//!
//! - `COGNITO_DOMAIN` (required): hosted UI base URL, e.g.
//!   `https://academy.auth.ap-northeast-2.amazoncognito.com`
//! - `COGNITO_CLIENT_ID` (required): app client id
//! - `COGNITO_CLIENT_SECRET`: app client secret; sent as HTTP basic auth on
//!   the token call when present
//! - `COGNITO_REDIRECT_URI` (required): callback registered with the provider
//! - `COGNITO_LOGOUT_URI`: where the provider sends the browser after logout
//!   (default `http://localhost:3000`)
//! - `COGNITO_SCOPES`: space separated (default `email openid phone`)
//! - `COGNITO_TIMEOUT_SECS`: token endpoint timeout (default 10)

use std::env;
use std::time::Duration;

use crate::{ConfigError, parsed_or, required};

pub const DEFAULT_SCOPES: &str = "email openid phone";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CognitoConfig {
    pub domain: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub logout_uri: String,
    pub scopes: String,
    pub timeout: Duration,
}

impl CognitoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let domain = required("COGNITO_DOMAIN")?;
        if !(domain.starts_with("https://") || domain.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: "COGNITO_DOMAIN",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            domain: domain.trim_end_matches('/').to_string(),
            client_id: required("COGNITO_CLIENT_ID")?,
            client_secret: env::var("COGNITO_CLIENT_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty()),
            redirect_uri: required("COGNITO_REDIRECT_URI")?,
            logout_uri: env::var("COGNITO_LOGOUT_URI")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            scopes: env::var("COGNITO_SCOPES").unwrap_or_else(|_| DEFAULT_SCOPES.to_string()),
            timeout: Duration::from_secs(parsed_or("COGNITO_TIMEOUT_SECS", 10)),
        })
    }

    /// Configuration pointing at `domain`, for local development and tests.
    pub fn local(domain: &str, client_id: &str, redirect_uri: &str) -> Self {
        Self {
            domain: domain.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: None,
            redirect_uri: redirect_uri.to_string(),
            logout_uri: "http://localhost:3000".to_string(),
            scopes: DEFAULT_SCOPES.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.domain)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.domain)
    }

    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let config = CognitoConfig::local(
            "https://academy.auth.example.com/",
            "client",
            "http://localhost:3000/api/auth/callback",
        );
        assert_eq!(
            config.token_endpoint(),
            "https://academy.auth.example.com/oauth2/token"
        );
        assert_eq!(
            config.authorize_endpoint(),
            "https://academy.auth.example.com/oauth2/authorize"
        );
        assert_eq!(config.logout_endpoint(), "https://academy.auth.example.com/logout");
        assert_eq!(config.scopes, "email openid phone");
    }
}
