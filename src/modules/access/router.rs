use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{check_access, get_accessible_functions, get_accessible_pages};

pub fn init_access_router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(get_accessible_pages))
        .route("/functions", get(get_accessible_functions))
        .route("/check", post(check_access))
}
