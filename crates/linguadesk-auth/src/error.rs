use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Failures on the login callback path.
///
/// Rendered to clients as `{"code", "message", "details"}`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization code is missing")]
    MissingCode,

    #[error("Login state does not match")]
    StateMismatch,

    #[error("Identity provider rejected the login: {error}")]
    Provider {
        error: String,
        description: Option<String>,
    },

    #[error("Token exchange failed with status {status}")]
    TokenExchange { status: u16, body: String },

    #[error("Token endpoint unreachable: {0}")]
    Transport(String),

    #[error("Token response could not be read: {0}")]
    InvalidTokenResponse(String),

    #[error("ID token is invalid: {0}")]
    InvalidIdToken(String),

    #[error("Session could not be encoded: {0}")]
    SessionEncoding(String),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthErrorBody {
    pub code: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCode => "missing_code",
            AuthError::StateMismatch => "state_mismatch",
            AuthError::Provider { .. } => "provider_error",
            AuthError::TokenExchange { .. } => "token_exchange_failed",
            AuthError::Transport(_) => "provider_unreachable",
            AuthError::InvalidTokenResponse(_) => "invalid_token_response",
            AuthError::InvalidIdToken(_) => "invalid_id_token",
            AuthError::SessionEncoding(_) => "session_encoding_failed",
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            AuthError::Provider { error, description } => Some(json!({
                "error": error,
                "error_description": description,
            })),
            AuthError::TokenExchange { status, body } => Some(json!({
                "status": status,
                "body": body,
            })),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCode | AuthError::StateMismatch | AuthError::Provider { .. } => {
                StatusCode::BAD_REQUEST
            }
            AuthError::TokenExchange { .. }
            | AuthError::Transport(_)
            | AuthError::InvalidTokenResponse(_)
            | AuthError::InvalidIdToken(_) => StatusCode::BAD_GATEWAY,
            AuthError::SessionEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> AuthErrorBody {
        AuthErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::InvalidTokenResponse(err.to_string())
        } else {
            AuthError::Transport(err.to_string())
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(code = self.code(), error = %self, "Login callback failed");
        (self.status(), Json(self.body())).into_response()
    }
}
