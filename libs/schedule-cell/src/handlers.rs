use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use directory_cell::SupabaseDoctorDirectory;
use shared_config::AppConfig;
use shared_models::{ActionResponse, AppError};
use shared_utils::ClinicClock;

use crate::models::ScheduleAction;
use crate::services::{
    AvailabilityStore, CalendarProjector, DayEditor, DisplayedMonth, SummaryService,
    WindowDraftRequest, WindowStore,
};

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub confirm: Option<bool>,
}

// ==============================================================================
// SCHEDULES
// ==============================================================================

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let store = AvailabilityStore::new(&state);

    let schedules = store.list(Some(doctor_id)).await
        .map_err(|e| e.into_app_error(ScheduleAction::Load))?;

    Ok(Json(json!({
        "schedules": schedules,
        "total": schedules.len()
    })))
}

/// Month grid; defaults to the clinic's current month.
#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, AppError> {
    let today = ClinicClock::from_config(&state).today();

    let month = match (query.year, query.month) {
        (None, None) => DisplayedMonth::containing(today),
        (year, month) => {
            let current = DisplayedMonth::containing(today);
            DisplayedMonth::new(year.unwrap_or(current.year()), month.unwrap_or(current.month()))
                .map_err(|e| e.into_app_error(ScheduleAction::Load))?
        }
    };

    let store = AvailabilityStore::new(&state);
    let windows = store.list(Some(doctor_id)).await
        .map_err(|e| e.into_app_error(ScheduleAction::Load))?;

    Ok(Json(json!(CalendarProjector::project(&windows, month, today))))
}

#[axum::debug_handler]
pub async fn get_day(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<Value>, AppError> {
    let today = ClinicClock::from_config(&state).today();
    let store = AvailabilityStore::new(&state);

    let windows = store.list(Some(doctor_id)).await
        .map_err(|e| e.into_app_error(ScheduleAction::Load))?;

    let mut editor = DayEditor::new(store, doctor_id, date);
    editor.open(&windows);

    Ok(Json(json!(editor.view(today))))
}

#[axum::debug_handler]
pub async fn add_window(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, date)): Path<(Uuid, NaiveDate)>,
    Json(request): Json<WindowDraftRequest>,
) -> Result<Json<Value>, AppError> {
    let today = ClinicClock::from_config(&state).today();

    let mut draft = request.into_draft()
        .map_err(|e| e.into_app_error(ScheduleAction::Add))?;

    let mut editor = DayEditor::new(AvailabilityStore::new(&state), doctor_id, date);
    let change = editor.add_window(&mut draft, today).await
        .map_err(|e| e.into_app_error(ScheduleAction::Add))?;

    Ok(Json(json!(ActionResponse::ok(change.message.clone(), change))))
}

/// Deletion only goes through with `?confirm=true`.
#[axum::debug_handler]
pub async fn delete_window(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, date, window_id)): Path<(Uuid, NaiveDate, Uuid)>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, AppError> {
    if query.confirm != Some(true) {
        return Err(AppError::BadRequest(
            "Deleting a window requires confirm=true".to_string(),
        ));
    }

    let mut editor = DayEditor::new(AvailabilityStore::new(&state), doctor_id, date);
    editor.request_delete(window_id);

    let change = editor.confirm_delete().await
        .map_err(|e| e.into_app_error(ScheduleAction::Delete))?;

    Ok(Json(json!(ActionResponse::ok(change.message.clone(), change))))
}

/// Live slot preview for the add form.
#[axum::debug_handler]
pub async fn preview_draft(
    Json(request): Json<WindowDraftRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = request.into_draft()
        .map_err(|e| e.into_app_error(ScheduleAction::Add))?;

    Ok(Json(json!(draft.preview_details())))
}

// ==============================================================================
// ASSISTANT PREVIEW
// ==============================================================================

fn summary_service(state: &AppConfig) -> SummaryService<SupabaseDoctorDirectory, AvailabilityStore> {
    SummaryService::new(SupabaseDoctorDirectory::new(state), AvailabilityStore::new(state))
}

#[axum::debug_handler]
pub async fn list_doctor_summaries(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let today = ClinicClock::from_config(&state).today();

    let summaries = summary_service(&state).summarize_all(today).await
        .map_err(|e| e.into_app_error(ScheduleAction::Load))?;

    Ok(Json(json!({
        "doctors": summaries,
        "total": summaries.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_summary(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let today = ClinicClock::from_config(&state).today();

    let summary = summary_service(&state).summarize(doctor_id, today).await?;

    Ok(Json(json!(summary)))
}

#[axum::debug_handler]
pub async fn get_doctor_summary_text(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<String, AppError> {
    let today = ClinicClock::from_config(&state).today();

    let summary = summary_service(&state).summarize(doctor_id, today).await?;

    Ok(summary.to_prompt_text())
}
