use axum::{Router, middleware, routing::any};

use crate::middleware::access::page_guard;
use crate::state::AppState;

use super::controller::portal_page;

pub fn init_portal_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{*path}", any(portal_page))
        .route_layer(middleware::from_fn_with_state(state, page_guard))
}
