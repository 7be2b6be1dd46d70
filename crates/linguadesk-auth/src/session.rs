//! The `auth-session` cookie.
//!
//! The cookie value is URL-encoded JSON:
//! `{"user":{"id","email","name","role"},"accessToken","idToken","expiresAt"}`
//! where `expiresAt` is epoch milliseconds. A companion `auth-session.sig`
//! cookie carries the hex HMAC-SHA256 of that value under the session secret;
//! a value without a matching signature is not a session.

use axum::http::{HeaderMap, header};
use chrono::Utc;
use cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use hmac::{Hmac, Mac};
use linguadesk_config::SessionConfig;
use linguadesk_core::names::{pages, roles};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use utoipa::ToSchema;

use crate::cognito::TokenSet;
use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: SessionUser,
    pub access_token: String,
    pub id_token: String,
    pub expires_at: i64,
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp_millis()
    }
}

pub fn create_auth_session(
    user: SessionUser,
    tokens: &TokenSet,
    config: &SessionConfig,
) -> AuthSession {
    let max_age = i64::try_from(config.max_age.as_millis()).unwrap_or(i64::MAX);

    AuthSession {
        user,
        access_token: tokens.access_token.clone(),
        id_token: tokens.id_token.clone(),
        expires_at: Utc::now().timestamp_millis().saturating_add(max_age),
    }
}

fn cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    Cookie::build((name, value))
        .path("/")
        .max_age(CookieDuration::seconds(
            i64::try_from(max_age).unwrap_or(i64::MAX),
        ))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .to_string()
}

fn mac(secret: &str) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AuthError::SessionEncoding(err.to_string()))
}

/// Hex HMAC-SHA256 of a cookie value.
pub fn sign_session_value(value: &str, secret: &str) -> Result<String, AuthError> {
    let mut mac = mac(secret)?;
    mac.update(value.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of `signature` against `value`.
pub fn verify_session_value(value: &str, signature: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = mac(secret) else {
        return false;
    };
    mac.update(value.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// `Set-Cookie` values carrying `session` and its signature.
pub fn session_cookies(
    session: &AuthSession,
    config: &SessionConfig,
) -> Result<[String; 2], AuthError> {
    let json =
        serde_json::to_string(session).map_err(|err| AuthError::SessionEncoding(err.to_string()))?;
    let value = urlencoding::encode(&json);
    let signature = sign_session_value(&value, &config.secret)?;
    let max_age = config.max_age.as_secs();

    Ok([
        cookie(&config.cookie_name, &value, max_age, config.secure),
        cookie(
            &config.signature_cookie_name(),
            &signature,
            max_age,
            config.secure,
        ),
    ])
}

pub fn clear_session_cookies(config: &SessionConfig) -> [String; 2] {
    [
        cookie(&config.cookie_name, "", 0, config.secure),
        cookie(&config.signature_cookie_name(), "", 0, config.secure),
    ]
}

pub fn state_cookie(state: &str, config: &SessionConfig) -> String {
    cookie(
        &config.state_cookie_name,
        state,
        config.state_max_age.as_secs(),
        config.secure,
    )
}

pub fn clear_state_cookie(config: &SessionConfig) -> String {
    cookie(&config.state_cookie_name, "", 0, config.secure)
}

/// Raw value of cookie `name` from the request's `Cookie` headers. Values are
/// not percent-decoded.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// The live session carried by the request, if any.
///
/// A missing cookie, a missing or wrong signature, an undecodable value, and an
/// expired session all yield `None`.
pub fn get_session_from_cookies(headers: &HeaderMap, config: &SessionConfig) -> Option<AuthSession> {
    let raw = cookie_value(headers, &config.cookie_name)?;

    let signed = cookie_value(headers, &config.signature_cookie_name())
        .is_some_and(|signature| verify_session_value(&raw, &signature, &config.secret));
    if !signed {
        tracing::warn!("Session cookie signature missing or invalid");
        return None;
    }

    let json = urlencoding::decode(&raw).ok()?;
    let session: AuthSession = serde_json::from_str(&json).ok()?;

    if session.is_expired() {
        tracing::debug!(user = %session.user.id, "Session cookie expired");
        return None;
    }
    Some(session)
}

/// Landing page after login for `role`.
pub fn dashboard_path(role: &str) -> &'static str {
    match role {
        roles::MASTER | roles::ADMIN => pages::ADMIN_DASHBOARD,
        roles::TEACHER => pages::TEACHER_DASHBOARD,
        roles::STAFF => pages::STAFF_DASHBOARD,
        roles::STUDENT => pages::STUDENT_DASHBOARD,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn tokens() -> TokenSet {
        TokenSet {
            access_token: "access".to_string(),
            id_token: "id".to_string(),
            refresh_token: None,
            expires_in: Some(3600),
            token_type: Some("Bearer".to_string()),
        }
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "u-1".to_string(),
            email: "kim@academy.test".to_string(),
            name: "Kim; Min-ji".to_string(),
            role: roles::TEACHER.to_string(),
        }
    }

    fn pair(set_cookie: &str) -> &str {
        set_cookie.split(';').next().unwrap()
    }

    fn request_with(set_cookies: &[String]) -> HeaderMap {
        let pairs: Vec<&str> = set_cookies.iter().map(|c| pair(c)).collect();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}", pairs.join("; "))).unwrap(),
        );
        headers
    }

    fn forged_master_value() -> String {
        let forged = serde_json::json!({
            "user": {
                "id": "intruder",
                "email": "intruder@example.test",
                "name": "Intruder",
                "role": "master",
            },
            "accessToken": "",
            "idToken": "",
            "expiresAt": 9_999_999_999_999_i64,
        });
        urlencoding::encode(&forged.to_string()).into_owned()
    }

    #[test]
    fn test_session_expires_after_max_age() {
        let config = SessionConfig::default();
        let before = Utc::now().timestamp_millis();
        let session = create_auth_session(user(), &tokens(), &config);

        assert!(session.expires_at >= before + 604_800_000);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_cookie_attributes() {
        let config = SessionConfig::default();
        let session = create_auth_session(user(), &tokens(), &config);
        let [value, signature] = session_cookies(&session, &config).unwrap();

        assert!(value.starts_with("auth-session="));
        assert!(signature.starts_with("auth-session.sig="));
        for set_cookie in [&value, &signature] {
            assert!(set_cookie.contains("HttpOnly"));
            assert!(set_cookie.contains("SameSite=Lax"));
            assert!(set_cookie.contains("Path=/"));
            assert!(set_cookie.contains("Max-Age=604800"));
            assert!(!set_cookie.contains("Secure"));
        }

        let secure = SessionConfig {
            secure: true,
            ..SessionConfig::default()
        };
        for cleared in clear_session_cookies(&secure) {
            assert!(cleared.contains("Max-Age=0"));
            assert!(cleared.contains("Secure"));
            assert!(cleared.contains("HttpOnly"));
        }
    }

    #[test]
    fn test_cookie_value_is_camel_case_json() {
        let config = SessionConfig::default();
        let session = create_auth_session(user(), &tokens(), &config);
        let [value, _] = session_cookies(&session, &config).unwrap();

        let raw = pair(&value).strip_prefix("auth-session=").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&urlencoding::decode(raw).unwrap()).unwrap();
        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["user"]["role"], "teacher");
        assert!(json["expiresAt"].is_i64());
    }

    #[test]
    fn test_session_read_back_from_request() {
        let config = SessionConfig::default();
        let session = create_auth_session(user(), &tokens(), &config);
        let headers = request_with(&session_cookies(&session, &config).unwrap());

        assert_eq!(get_session_from_cookies(&headers, &config), Some(session));
    }

    #[test]
    fn test_expired_or_garbled_sessions_are_ignored() {
        let config = SessionConfig::default();
        let mut session = create_auth_session(user(), &tokens(), &config);
        session.expires_at = Utc::now().timestamp_millis() - 1;
        let headers = request_with(&session_cookies(&session, &config).unwrap());
        assert!(get_session_from_cookies(&headers, &config).is_none());

        let garbled = "%7Bnot-json";
        let signature = sign_session_value(garbled, &config.secret).unwrap();
        let headers = request_with(&[
            format!("auth-session={garbled}"),
            format!("auth-session.sig={signature}"),
        ]);
        assert!(get_session_from_cookies(&headers, &config).is_none());
        assert!(get_session_from_cookies(&HeaderMap::new(), &config).is_none());
    }

    #[test]
    fn test_unsigned_forged_session_is_rejected() {
        let config = SessionConfig::default();
        let headers = request_with(&[format!("auth-session={}", forged_master_value())]);

        assert!(get_session_from_cookies(&headers, &config).is_none());
    }

    #[test]
    fn test_tampered_or_foreign_signature_is_rejected() {
        let config = SessionConfig::default();
        let session = create_auth_session(user(), &tokens(), &config);
        let [_, genuine_signature] = session_cookies(&session, &config).unwrap();

        // A real signature does not carry over to another value.
        let tampered = request_with(&[
            format!("auth-session={}", forged_master_value()),
            genuine_signature,
        ]);
        assert!(get_session_from_cookies(&tampered, &config).is_none());

        // Signed with a key the server does not hold.
        let value = forged_master_value();
        let signature = sign_session_value(&value, "attacker-chosen-key").unwrap();
        let foreign = request_with(&[
            format!("auth-session={value}"),
            format!("auth-session.sig={signature}"),
        ]);
        assert!(get_session_from_cookies(&foreign, &config).is_none());

        let garbage = request_with(&[
            format!("auth-session={value}"),
            "auth-session.sig=not-hex".to_string(),
        ]);
        assert!(get_session_from_cookies(&garbage, &config).is_none());
    }

    #[test]
    fn test_signature_roundtrip() {
        let signature = sign_session_value("abc", "secret").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(verify_session_value("abc", &signature, "secret"));
        assert!(!verify_session_value("abd", &signature, "secret"));
        assert!(!verify_session_value("abc", &signature, "other"));
    }

    #[test]
    fn test_short_max_age() {
        let config = SessionConfig {
            max_age: Duration::from_secs(60),
            ..SessionConfig::default()
        };
        let session = create_auth_session(user(), &tokens(), &config);
        assert!(session.expires_at <= Utc::now().timestamp_millis() + 60_000);
    }

    #[test]
    fn test_dashboards() {
        assert_eq!(dashboard_path(roles::MASTER), "/admin");
        assert_eq!(dashboard_path(roles::ADMIN), "/admin");
        assert_eq!(dashboard_path(roles::TEACHER), "/teacher");
        assert_eq!(dashboard_path(roles::STAFF), "/staff");
        assert_eq!(dashboard_path(roles::STUDENT), "/student");
        assert_eq!(dashboard_path("receptionist"), "/");
    }
}
