use linguadesk_config::CognitoConfig;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::claims;
use crate::error::AuthError;
use crate::session::SessionUser;

/// Tokens returned by the authorization code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Client for the hosted UI and token endpoint of the identity provider.
#[derive(Debug, Clone)]
pub struct CognitoClient {
    config: CognitoConfig,
    http: Client,
}

impl CognitoClient {
    pub fn new(config: CognitoConfig) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    /// Authorization redirect for the code flow.
    pub fn create_login_url(&self, state: Option<&str>) -> Result<Url, AuthError> {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", self.config.scopes.as_str()),
        ];
        if let Some(state) = state {
            params.push(("state", state));
        }

        Url::parse_with_params(&self.config.authorize_endpoint(), &params)
            .map_err(|err| AuthError::Transport(format!("invalid authorize URL: {err}")))
    }

    pub fn create_logout_url(&self) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.config.logout_endpoint(),
            [
                ("client_id", self.config.client_id.as_str()),
                ("logout_uri", self.config.logout_uri.as_str()),
            ],
        )
        .map_err(|err| AuthError::Transport(format!("invalid logout URL: {err}")))
    }

    /// Trades an authorization code for tokens. One request, no retry.
    #[instrument(skip(self, code), fields(endpoint = %self.config.token_endpoint()))]
    pub async fn exchange_code_for_token(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenSet, AuthError> {
        if code.is_empty() {
            return Err(AuthError::MissingCode);
        }

        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let mut request = self.http.post(self.config.token_endpoint()).form(&form);
        if let Some(secret) = &self.config.client_secret {
            request = request.basic_auth(&self.config.client_id, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token exchange rejected");
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let tokens = response
            .json::<TokenSet>()
            .await
            .map_err(|err| AuthError::InvalidTokenResponse(err.to_string()))?;

        info!("Token exchange succeeded");
        Ok(tokens)
    }

    pub fn decode_id_token(&self, id_token: &str) -> Result<SessionUser, AuthError> {
        claims::decode_id_token(id_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client() -> CognitoClient {
        CognitoClient::new(CognitoConfig::local(
            "https://academy.auth.example.com",
            "portal-client",
            "http://localhost:3000/api/auth/callback",
        ))
        .unwrap()
    }

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_login_url_carries_code_flow_parameters() {
        let url = client().create_login_url(Some("abc123")).unwrap();
        assert_eq!(url.path(), "/oauth2/authorize");

        let params = query(&url);
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "portal-client");
        assert_eq!(params["redirect_uri"], "http://localhost:3000/api/auth/callback");
        assert_eq!(params["scope"], "email openid phone");
        assert_eq!(params["state"], "abc123");
    }

    #[test]
    fn test_login_url_without_state() {
        let url = client().create_login_url(None).unwrap();
        assert!(!query(&url).contains_key("state"));
    }

    #[test]
    fn test_logout_url() {
        let url = client().create_logout_url().unwrap();
        assert_eq!(url.path(), "/logout");
        assert_eq!(query(&url)["logout_uri"], "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_empty_code_is_rejected_before_network() {
        let err = client()
            .exchange_code_for_token("", "http://localhost:3000/api/auth/callback")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCode));
    }
}
