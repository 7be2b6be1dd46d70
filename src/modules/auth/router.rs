use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{callback, get_session, login, logout};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", post(logout))
        .route("/session", get(get_session))
}
