use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use doctor_cell::handlers::DirectoryAppState;
use doctor_cell::router::doctor_routes;

pub fn create_router(state: Arc<DirectoryAppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctor Directory API is running!" }))
        .nest("/doctors", doctor_routes(state))
}
