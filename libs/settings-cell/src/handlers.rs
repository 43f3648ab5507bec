use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::{ActionResponse, AppError};

use crate::models::{ClinicSettings, UpsertValueRequest};
use crate::services::ConfigStore;

#[axum::debug_handler]
pub async fn list_settings(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let store = ConfigStore::new(&state);

    let rows = store.list().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الإعدادات"))?;

    Ok(Json(json!({
        "config": rows,
        "total": rows.len()
    })))
}

#[axum::debug_handler]
pub async fn get_clinic_settings(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let store = ConfigStore::new(&state);

    let rows = store.list().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الإعدادات"))?;

    Ok(Json(json!(ClinicSettings::from_rows(&rows))))
}

#[axum::debug_handler]
pub async fn save_clinic_settings(
    State(state): State<Arc<AppConfig>>,
    Json(settings): Json<ClinicSettings>,
) -> Result<Json<Value>, AppError> {
    let store = ConfigStore::new(&state);

    store.upsert_many(&settings.to_rows()).await
        .map_err(|e| AppError::from_store(&e, "خطأ في حفظ الإعدادات"))?;

    let rows = store.list().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الإعدادات"))?;

    Ok(Json(json!(ActionResponse::ok(
        "تم حفظ الإعدادات بنجاح",
        ClinicSettings::from_rows(&rows),
    ))))
}

#[axum::debug_handler]
pub async fn upsert_setting(
    State(state): State<Arc<AppConfig>>,
    Path(key): Path<String>,
    Json(request): Json<UpsertValueRequest>,
) -> Result<Json<Value>, AppError> {
    if key.trim().is_empty() {
        return Err(AppError::ValidationError("Config key must not be empty".to_string()));
    }

    let store = ConfigStore::new(&state);

    store.upsert(&key, &request.value, request.description.as_deref()).await
        .map_err(|e| AppError::from_store(&e, "خطأ في حفظ الإعداد"))?;

    Ok(Json(json!(ActionResponse::ok("تم حفظ الإعداد بنجاح", json!({
        "key": key,
        "value": request.value
    })))))
}
