use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn department_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_departments).post(handlers::create_department))
        .route(
            "/{department_id}",
            put(handlers::update_department).delete(handlers::delete_department),
        )
        .with_state(state)
}

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/active", get(handlers::list_active_doctors))
        .route(
            "/{doctor_id}",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )
        .route("/{doctor_id}/toggle", patch(handlers::toggle_doctor))
        .with_state(state)
}

pub fn service_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_services).post(handlers::create_service))
        .route(
            "/{service_id}",
            put(handlers::update_service).delete(handlers::delete_service),
        )
        .with_state(state)
}

pub fn dashboard_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/stats", get(handlers::dashboard_stats))
        .with_state(state)
}
