use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};

use crate::models::{ClinicService, CreateServiceRequest, UpdateServiceRequest};
use crate::services::{code::generate_code, decode_rows, first_row};

/// Services the clinic offers (consultations and procedures).
pub struct ServiceCatalog {
    supabase: SupabaseClient,
}

impl ServiceCatalog {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_services(&self) -> Result<Vec<ClinicService>> {
        debug!("Fetching services");

        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/services?select=*,department:departments(*)&order=created_at.desc",
            None,
            None,
        ).await?;

        decode_rows(rows)
    }

    pub async fn create_service(&self, request: CreateServiceRequest) -> Result<ClinicService> {
        debug!("Creating service: {}", request.name_en);

        let code = generate_code(&self.supabase, "SRV", "services").await?;

        let service_data = json!({
            "code": code,
            "department_id": request.department_id,
            "name_ar": request.name_ar,
            "name_en": request.name_en,
            "description_ar": request.description_ar,
            "description_en": request.description_en,
            "duration_minutes": request.duration_minutes,
            "service_type": request.service_type,
            "price": request.price,
            "is_active": request.is_active.unwrap_or(true),
        });

        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/services",
            None,
            Some(service_data),
            Some(return_representation()),
        ).await?;

        first_row(rows, "service")
    }

    pub async fn update_service(
        &self,
        service_id: Uuid,
        request: UpdateServiceRequest,
    ) -> Result<ClinicService> {
        debug!("Updating service: {}", service_id);

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
        if let Some(description_ar) = request.description_ar {
            update_data.insert("description_ar".to_string(), json!(description_ar));
        }
        if let Some(description_en) = request.description_en {
            update_data.insert("description_en".to_string(), json!(description_en));
        }
        if let Some(duration) = request.duration_minutes {
            update_data.insert("duration_minutes".to_string(), json!(duration));
        }
        if let Some(service_type) = request.service_type {
            update_data.insert("service_type".to_string(), json!(service_type));
        }
        if let Some(price) = request.price {
            update_data.insert("price".to_string(), json!(price));
        }
        if let Some(is_active) = request.is_active {
            update_data.insert("is_active".to_string(), json!(is_active));
        }

        let path = format!("/rest/v1/services?id=eq.{}", service_id);
        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            None,
            Some(Value::Object(update_data)),
            Some(return_representation()),
        ).await?;

        first_row(rows, "service")
    }

    pub async fn delete_service(&self, service_id: Uuid) -> Result<()> {
        debug!("Deleting service: {}", service_id);

        let path = format!("/rest/v1/services?id=eq.{}", service_id);
        self.supabase.execute(Method::DELETE, &path, None, None, None).await
    }
}
