use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};

use crate::models::{CreateDoctorRequest, Doctor, DoctorCreation, UpdateDoctorRequest};
use crate::services::{code::generate_code, decode_rows, first_row};

/// Embeds the department and the linked services with their details.
pub(crate) const DOCTOR_SELECT: &str =
    "*,department:departments(*),doctor_services(*,service:services(*))";

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Fetching doctors");

        let path = format!("/rest/v1/doctors?select={}&order=created_at.desc", DOCTOR_SELECT);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        decode_rows(rows)
    }

    /// Active doctors ordered by Arabic name, as offered in the schedule selector.
    pub async fn list_active_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Fetching active doctors");

        let path = format!(
            "/rest/v1/doctors?select={}&is_active=eq.true&order=name_ar.asc",
            DOCTOR_SELECT
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        decode_rows(rows)
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>> {
        debug!("Fetching doctor: {}", doctor_id);

        let path = format!("/rest/v1/doctors?select={}&id=eq.{}", DOCTOR_SELECT, doctor_id);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<DoctorCreation> {
        debug!("Creating doctor: {}", request.name_en);

        let code = generate_code(&self.supabase, "DOC", "doctors").await?;

        let doctor_data = json!({
            "code": code,
            "department_id": request.department_id,
            "name_ar": request.name_ar,
            "name_en": request.name_en,
            "specialization_ar": request.specialization_ar,
            "specialization_en": request.specialization_en,
            "is_active": request.is_active.unwrap_or(true),
        });

        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/doctors",
            None,
            Some(doctor_data),
            Some(return_representation()),
        ).await?;

        let doctor: Doctor = first_row(rows, "doctor")?;
        debug!("Doctor created with code {}", doctor.code);

        let services_linked = match self.link_services(doctor.id, &request.service_ids).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Doctor {} created but linking services failed: {}", doctor.id, e);
                false
            }
        };

        Ok(DoctorCreation { doctor, services_linked })
    }

    pub async fn update_doctor(&self, doctor_id: Uuid, request: UpdateDoctorRequest) -> Result<Doctor> {
        debug!("Updating doctor: {}", doctor_id);

        let mut update_data = serde_json::Map::new();

        if let Some(department_id) = request.department_id {
            update_data.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(name_ar) = request.name_ar {
            update_data.insert("name_ar".to_string(), json!(name_ar));
        }
        if let Some(name_en) = request.name_en {
            update_data.insert("name_en".to_string(), json!(name_en));
        }
        if let Some(specialization_ar) = request.specialization_ar {
            update_data.insert("specialization_ar".to_string(), json!(specialization_ar));
        }
        if let Some(specialization_en) = request.specialization_en {
            update_data.insert("specialization_en".to_string(), json!(specialization_en));
        }
        if let Some(is_active) = request.is_active {
            update_data.insert("is_active".to_string(), json!(is_active));
        }

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            None,
            Some(Value::Object(update_data)),
            Some(return_representation()),
        ).await?;

        let doctor: Doctor = first_row(rows, "doctor")?;

        if let Some(service_ids) = request.service_ids {
            let links_path = format!("/rest/v1/doctor_services?doctor_id=eq.{}", doctor_id);
            self.supabase.execute(Method::DELETE, &links_path, None, None, None).await?;
            self.link_services(doctor_id, &service_ids).await?;
        }

        Ok(doctor)
    }

    /// Schedules of the doctor are removed by the store's cascade.
    pub async fn delete_doctor(&self, doctor_id: Uuid) -> Result<()> {
        debug!("Deleting doctor: {}", doctor_id);

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        self.supabase.execute(Method::DELETE, &path, None, None, None).await
    }

    /// Flips `is_active` away from `current` and returns the new state.
    pub async fn toggle_active(&self, doctor_id: Uuid, current: bool) -> Result<bool> {
        debug!("Toggling doctor {} from is_active={}", doctor_id, current);

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        self.supabase.execute(
            Method::PATCH,
            &path,
            None,
            Some(json!({ "is_active": !current })),
            None,
        ).await?;

        Ok(!current)
    }

    async fn link_services(&self, doctor_id: Uuid, service_ids: &[Uuid]) -> Result<()> {
        if service_ids.is_empty() {
            return Ok(());
        }

        let links: Vec<Value> = service_ids
            .iter()
            .map(|service_id| json!({
                "doctor_id": doctor_id,
                "service_id": service_id,
                "is_active": true,
            }))
            .collect();

        self.supabase.execute(
            Method::POST,
            "/rest/v1/doctor_services",
            None,
            Some(Value::Array(links)),
            None,
        ).await
    }
}
