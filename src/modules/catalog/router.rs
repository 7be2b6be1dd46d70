use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_function_catalog, get_page_catalog};

pub fn init_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(get_page_catalog))
        .route("/functions", get(get_function_catalog))
}
