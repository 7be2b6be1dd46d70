use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use linguadesk_auth::{
    AuthError, AuthErrorBody, clear_session_cookies, clear_state_cookie, cookie_value,
    create_auth_session, dashboard_path, session_cookies, state_cookie,
};
use linguadesk_core::AppError;
use rand::{Rng, distributions::Alphanumeric};
use tracing::{Instrument, instrument};

use crate::metrics::{track_login_failure, track_login_success, track_logout};
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;
use crate::utils::tracing::{record_auth_result, record_error, record_success, record_user};
use crate::{audit_event, auth_span, security_event};

use super::model::{CallbackParams, LogoutResponse, SessionResponse};

const STATE_LENGTH: usize = 32;

fn new_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

fn set_cookie(value: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|err| AuthError::SessionEncoding(err.to_string()))
}

fn redirect(location: &str, cookies: &[String]) -> Result<Response, AuthError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(location)
            .map_err(|err| AuthError::Transport(format!("invalid redirect: {err}")))?,
    );
    for cookie in cookies {
        headers.append(header::SET_COOKIE, set_cookie(cookie)?);
    }
    Ok((StatusCode::FOUND, headers).into_response())
}

/// Start the hosted-UI login
#[utoipa::path(
    get,
    path = "/api/auth/login",
    responses(
        (status = 302, description = "Redirect to the identity provider; sets the auth-state cookie"),
        (status = 502, description = "Login URL could not be built", body = AuthErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login(State(state): State<AppState>) -> Result<Response, AuthError> {
    let login_state = new_state();
    let url = state.cognito.create_login_url(Some(&login_state))?;

    redirect(
        url.as_str(),
        &[state_cookie(&login_state, &state.session_config)],
    )
}

/// Complete the login after the identity provider redirects back
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Session cookie set; redirect to the role's dashboard"),
        (status = 400, description = "Missing code, state mismatch, or provider error", body = AuthErrorBody),
        (status = 502, description = "Token exchange failed", body = AuthErrorBody)
    ),
    tag = "Authentication"
)]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AuthError> {
    let span = auth_span!("callback");

    async move {
        match complete_login(&state, &headers, params).await {
            Ok(response) => {
                record_auth_result(true);
                record_success();
                Ok(response)
            }
            Err(err) => {
                record_auth_result(false);
                record_error(&err.to_string());
                track_login_failure(err.code());
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

async fn complete_login(
    state: &AppState,
    headers: &HeaderMap,
    params: CallbackParams,
) -> Result<Response, AuthError> {
    if let Some(error) = params.error {
        return Err(AuthError::Provider {
            error,
            description: params.error_description,
        });
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingCode)?;

    let expected = cookie_value(headers, &state.session_config.state_cookie_name);
    match (expected.as_deref(), params.state.as_deref()) {
        (Some(expected), Some(received)) if !expected.is_empty() && expected == received => {}
        _ => {
            security_event!("login_state_mismatch", has_cookie = expected.is_some());
            return Err(AuthError::StateMismatch);
        }
    }

    let redirect_uri = state.cognito.config().redirect_uri.clone();
    let tokens = state
        .cognito
        .exchange_code_for_token(&code, &redirect_uri)
        .await?;
    let user = state.cognito.decode_id_token(&tokens.id_token)?;
    record_user(&user.id, &user.role);

    let session = create_auth_session(user, &tokens, &state.session_config);
    let [value, signature] = session_cookies(&session, &state.session_config)?;
    let cookies = [value, signature, clear_state_cookie(&state.session_config)];

    track_login_success(&session.user.role);
    audit_event!(
        "login",
        "session",
        user.id = %session.user.id,
        user.role = %session.user.role
    );

    redirect(dashboard_path(&session.user.role), &cookies)
}

/// Sign out: clears the session cookies and returns the provider logout URL
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = LogoutResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(session) = linguadesk_auth::get_session_from_cookies(&headers, &state.session_config)
    {
        audit_event!("logout", "session", user.id = %session.user.id);
    }
    track_logout();

    let logout_url = state
        .cognito
        .create_logout_url()
        .map_err(AppError::bad_gateway)?;
    let mut cleared = HeaderMap::new();
    for cookie in clear_session_cookies(&state.session_config) {
        cleared.append(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).map_err(AppError::internal)?,
        );
    }

    Ok((
        cleared,
        Json(LogoutResponse {
            logout_url: logout_url.to_string(),
        }),
    )
        .into_response())
}

/// Current session user
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "No live session")
    ),
    tag = "Authentication",
    security(("session_cookie" = []))
)]
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: session.user,
        expires_at: session.expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_random_alphanumeric() {
        let first = new_state();
        let second = new_state();
        assert_eq!(first.len(), STATE_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_redirect_sets_every_cookie() {
        let response = redirect("/teacher", &["a=1".to_string(), "b=2".to_string()]).unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/teacher");
        assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
