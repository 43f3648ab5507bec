use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn settings_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_settings).put(handlers::save_clinic_settings))
        .route("/clinic", get(handlers::get_clinic_settings))
        .route("/{key}", put(handlers::upsert_setting))
        .with_state(state)
}
