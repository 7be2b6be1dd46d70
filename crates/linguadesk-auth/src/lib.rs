//! # Linguadesk Auth
//!
//! Session glue around the hosted identity provider.
//!
//! - [`cognito`]: authorize/logout URLs and the authorization code exchange
//! - [`claims`]: ID token decoding and role resolution
//! - [`session`]: the signed `auth-session` cookie
//! - [`error`]: [`AuthError`], the callback failure type
//!
//! # Example
//!
//! ```ignore
//! use linguadesk_auth::{CognitoClient, create_auth_session, session_cookies};
//!
//! let client = CognitoClient::new(CognitoConfig::from_env()?)?;
//! let tokens = client.exchange_code_for_token(&code, &redirect_uri).await?;
//! let user = client.decode_id_token(&tokens.id_token)?;
//! let session = create_auth_session(user, &tokens, &session_config);
//! let [value, signature] = session_cookies(&session, &session_config)?;
//! ```

pub mod claims;
pub mod cognito;
pub mod error;
pub mod session;

pub use claims::{IdTokenClaims, decode_id_token};
pub use cognito::{CognitoClient, TokenSet};
pub use error::{AuthError, AuthErrorBody};
pub use session::{
    AuthSession, SessionUser, clear_session_cookies, clear_state_cookie, cookie_value,
    create_auth_session, dashboard_path, get_session_from_cookies, session_cookies,
    sign_session_value, state_cookie, verify_session_value,
};
