use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, DirectoryAppState};

pub fn doctor_routes(state: Arc<DirectoryAppState>) -> Router {
    Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/specialties", get(handlers::get_specialties))
        .route("/suggestions", get(handlers::get_suggestions))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
