use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{ActionResponse, AppError};

use crate::models::{
    CreateDepartmentRequest, CreateDoctorRequest, CreateServiceRequest, ToggleActiveRequest,
    UpdateDepartmentRequest, UpdateDoctorRequest, UpdateServiceRequest,
};
use crate::services::{
    DashboardService, DepartmentService, DoctorDirectory, DoctorService, ServiceCatalog,
    SupabaseDoctorDirectory,
};

// ==============================================================================
// DEPARTMENTS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let departments = service.list_departments().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الأقسام"))?;

    Ok(Json(json!({
        "departments": departments,
        "total": departments.len()
    })))
}

#[axum::debug_handler]
pub async fn create_department(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let department = service.create_department(request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في إضافة القسم"))?;

    Ok(Json(json!(ActionResponse::ok("تم إضافة القسم بنجاح", department))))
}

#[axum::debug_handler]
pub async fn update_department(
    State(state): State<Arc<AppConfig>>,
    Path(department_id): Path<Uuid>,
    Json(request): Json<UpdateDepartmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let department = service.update_department(department_id, request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحديث القسم"))?;

    Ok(Json(json!(ActionResponse::ok("تم تحديث القسم بنجاح", department))))
}

#[axum::debug_handler]
pub async fn delete_department(
    State(state): State<Arc<AppConfig>>,
    Path(department_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    service.delete_department(department_id).await
        .map_err(|e| AppError::from_store(&e, "خطأ في حذف القسم - قد يكون مرتبطاً بأطباء أو خدمات"))?;

    Ok(Json(json!(ActionResponse::ok("تم حذف القسم بنجاح", department_id))))
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctors = service.list_doctors().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الأطباء"))?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

/// Doctor selector entries for the schedule screen.
#[axum::debug_handler]
pub async fn list_active_doctors(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let directory = SupabaseDoctorDirectory::new(&state);

    let listings = directory.listings().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الأطباء"))?;

    Ok(Json(json!({
        "doctors": listings,
        "total": listings.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctor = service.get_doctor(doctor_id).await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الطبيب"))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let creation = service.create_doctor(request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في إضافة الطبيب"))?;

    let message = if creation.services_linked {
        "تم إضافة الطبيب بنجاح"
    } else {
        "تم إضافة الطبيب لكن حدث خطأ في ربط الخدمات"
    };

    Ok(Json(json!(ActionResponse::ok(message, creation))))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctor = service.update_doctor(doctor_id, request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحديث الطبيب"))?;

    Ok(Json(json!(ActionResponse::ok("تم تحديث الطبيب بنجاح", doctor))))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    service.delete_doctor(doctor_id).await
        .map_err(|e| AppError::from_store(&e, "خطأ في حذف الطبيب"))?;

    Ok(Json(json!(ActionResponse::ok("تم حذف الطبيب بنجاح", doctor_id))))
}

#[axum::debug_handler]
pub async fn toggle_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<ToggleActiveRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let is_active = service.toggle_active(doctor_id, request.is_active).await
        .map_err(|e| AppError::from_store(&e, "خطأ في تغيير حالة الطبيب"))?;

    let message = if is_active { "تم تفعيل الطبيب" } else { "تم إلغاء تفعيل الطبيب" };

    Ok(Json(json!(ActionResponse::ok(message, json!({
        "id": doctor_id,
        "is_active": is_active
    })))))
}

// ==============================================================================
// SERVICES
// ==============================================================================

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let catalog = ServiceCatalog::new(&state);

    let services = catalog.list_services().await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحميل الخدمات"))?;

    Ok(Json(json!({
        "services": services,
        "total": services.len()
    })))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    if request.duration_minutes <= 0 {
        return Err(AppError::ValidationError("Service duration must be positive".to_string()));
    }

    let catalog = ServiceCatalog::new(&state);

    let service = catalog.create_service(request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في إضافة الخدمة"))?;

    Ok(Json(json!(ActionResponse::ok("تم إضافة الخدمة بنجاح", service))))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<AppConfig>>,
    Path(service_id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    let catalog = ServiceCatalog::new(&state);

    let service = catalog.update_service(service_id, request).await
        .map_err(|e| AppError::from_store(&e, "خطأ في تحديث الخدمة"))?;

    Ok(Json(json!(ActionResponse::ok("تم تحديث الخدمة بنجاح", service))))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<AppConfig>>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let catalog = ServiceCatalog::new(&state);

    catalog.delete_service(service_id).await
        .map_err(|e| AppError::from_store(&e, "خطأ في حذف الخدمة - قد تكون مرتبطة بأطباء"))?;

    Ok(Json(json!(ActionResponse::ok("تم حذف الخدمة بنجاح", service_id))))
}

// ==============================================================================
// DASHBOARD
// ==============================================================================

#[axum::debug_handler]
pub async fn dashboard_stats(
    State(state): State<Arc<AppConfig>>,
) -> Json<Value> {
    let dashboard = DashboardService::new(&state);
    Json(json!(dashboard.stats().await))
}
