use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use linguadesk_core::names::roles;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::session::SessionUser;

/// The subset of ID token claims the session is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "cognito:username", default)]
    pub username: Option<String>,
    #[serde(rename = "custom:role", default)]
    pub role: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl IdTokenClaims {
    /// `custom:role`, then the first group, then `student`.
    pub fn resolved_role(&self) -> String {
        self.role
            .as_deref()
            .filter(|role| !role.is_empty())
            .or_else(|| self.groups.first().map(String::as_str))
            .unwrap_or(roles::STUDENT)
            .to_string()
    }

    pub fn into_user(self) -> Result<SessionUser, AuthError> {
        let role = self.resolved_role();
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AuthError::InvalidIdToken("email claim is missing".to_string()))?;
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(SessionUser {
            id: self.sub,
            email,
            name,
            role,
        })
    }
}

/// Reads the claims of an ID token without checking its signature.
///
/// Only call this on tokens received directly from the token endpoint.
pub fn decode_claims(id_token: &str) -> Result<IdTokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<IdTokenClaims>(id_token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|err| AuthError::InvalidIdToken(err.to_string()))
}

/// Decodes an ID token into the user stored in the session.
pub fn decode_id_token(id_token: &str) -> Result<SessionUser, AuthError> {
    decode_claims(id_token)?.into_user()
}
