use axum::{extract::FromRequestParts, http::request::Parts};
use linguadesk_auth::{AuthSession, get_session_from_cookies};
use linguadesk_core::AppError;

use crate::state::AppState;

/// Extractor for the live, signed `auth-session` cookie. Rejects with 401 when
/// the cookie is missing, unsigned, unreadable, or expired.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub AuthSession);

impl CurrentSession {
    pub fn role(&self) -> &str {
        &self.0.user.role
    }

    pub fn user_id(&self) -> &str {
        &self.0.user.id
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        get_session_from_cookies(&parts.headers, &state.session_config)
            .map(CurrentSession)
            .ok_or_else(|| AppError::unauthorized("Not signed in"))
    }
}

/// Creates an extractor that requires a special permission on the session role.
#[macro_export]
macro_rules! require_special {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::CurrentSession);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = linguadesk_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let session = <$crate::middleware::auth::CurrentSession as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                let permission = $permission;
                if !state
                    .registry
                    .check_special_permission(session.role(), permission)
                {
                    $crate::security_event!(
                        "permission_denied",
                        user.id = %session.user_id(),
                        user.role = %session.role(),
                        permission = %permission
                    );
                    return Err(linguadesk_core::AppError::forbidden(format!(
                        "Access denied. Missing special permission: {}",
                        permission
                    )));
                }

                Ok($name(session))
            }
        }
    };
}

require_special!(
    RequireManageRoles,
    linguadesk_access::SpecialPermission::ManageRoles
);
