#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, header};
use axum::routing::post;
use axum::{Form, Json, Router};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use linguadesk::router::init_router;
use linguadesk::state::AppState;
use linguadesk_access::RoleRegistry;
use linguadesk_auth::{
    AuthSession, CognitoClient, SessionUser, TokenSet, create_auth_session, session_cookies,
};
use linguadesk_config::{CognitoConfig, CorsConfig, ServerConfig, SessionConfig};
use serde_json::{Value, json};

pub const CALLBACK_URI: &str = "http://localhost:3000/api/auth/callback";
pub const GOOD_CODE: &str = "good-code";

pub fn test_state(cognito_domain: &str) -> AppState {
    AppState {
        registry: Arc::new(RoleRegistry::with_defaults()),
        cognito: CognitoClient::new(CognitoConfig::local(
            cognito_domain,
            "portal-client",
            CALLBACK_URI,
        ))
        .unwrap(),
        session_config: SessionConfig::default(),
        cors_config: CorsConfig::from_list("http://localhost:3000"),
        server_config: ServerConfig::default(),
    }
}

pub fn setup_test_app() -> (Router, AppState) {
    let state = test_state("https://academy.auth.example.com");
    (init_router(state.clone()), state)
}

pub fn session_for(role: &str) -> AuthSession {
    let user = SessionUser {
        id: format!("user-{role}"),
        email: format!("{role}@academy.test"),
        name: format!("Test {role}"),
        role: role.to_string(),
    };
    let tokens = TokenSet {
        access_token: "access".to_string(),
        id_token: "id".to_string(),
        refresh_token: None,
        expires_in: Some(3600),
        token_type: Some("Bearer".to_string()),
    };
    create_auth_session(user, &tokens, &SessionConfig::default())
}

/// `name=value` pair to send back in a `Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

/// `Cookie` header value carrying a signed session for `role`.
pub fn session_cookie_for(role: &str) -> String {
    cookie_header(&session_cookies(&session_for(role), &SessionConfig::default()).unwrap())
}

/// Joins the `name=value` pairs of several `Set-Cookie` values.
pub fn cookie_header(set_cookies: &[String]) -> String {
    set_cookies
        .iter()
        .map(|set_cookie| cookie_pair(set_cookie))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn request(method: &str, uri: &str, role: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(header::COOKIE, session_cookie_for(role));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

pub fn id_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"fake-provider-key"),
    )
    .unwrap()
}

/// Serves `/oauth2/token` on a random local port and returns its base URL.
/// Only [`GOOD_CODE`] is exchanged; anything else gets `invalid_grant`.
pub async fn spawn_token_endpoint(claims: Value) -> String {
    let id_token = id_token(claims);
    let app = Router::new().route(
        "/oauth2/token",
        post(move |Form(form): Form<HashMap<String, String>>| {
            let id_token = id_token.clone();
            async move {
                let valid = form.get("grant_type").map(String::as_str) == Some("authorization_code")
                    && form.get("code").map(String::as_str) == Some(GOOD_CODE)
                    && form.get("redirect_uri").map(String::as_str) == Some(CALLBACK_URI);

                if valid {
                    (
                        axum::http::StatusCode::OK,
                        Json(json!({
                            "access_token": "provider-access",
                            "id_token": id_token,
                            "refresh_token": "provider-refresh",
                            "expires_in": 3600,
                            "token_type": "Bearer",
                        })),
                    )
                } else {
                    (
                        axum::http::StatusCode::BAD_REQUEST,
                        Json(json!({ "error": "invalid_grant" })),
                    )
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}
