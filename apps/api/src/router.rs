use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use directory_cell::router::{dashboard_routes, department_routes, doctor_routes, service_routes};
use schedule_cell::router::{preview_routes, schedule_routes};
use settings_cell::router::settings_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Admin API is running!" }))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/preview", preview_routes(state.clone()))
        .nest("/departments", department_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/services", service_routes(state.clone()))
        .nest("/settings", settings_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}
