use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/preview", post(handlers::preview_draft))
        .route("/{doctor_id}", get(handlers::list_schedules))
        .route("/{doctor_id}/calendar", get(handlers::get_calendar))
        .route("/{doctor_id}/days/{date}", get(handlers::get_day))
        .route("/{doctor_id}/days/{date}/windows", post(handlers::add_window))
        .route(
            "/{doctor_id}/days/{date}/windows/{window_id}",
            delete(handlers::delete_window),
        )
        .with_state(state)
}

pub fn preview_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/doctors", get(handlers::list_doctor_summaries))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_summary))
        .route("/doctors/{doctor_id}/text", get(handlers::get_doctor_summary_text))
        .with_state(state)
}
