use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};

use crate::models::{CreateDepartmentRequest, Department, UpdateDepartmentRequest};
use crate::services::{code::generate_code, decode_rows, first_row};

pub struct DepartmentService {
    supabase: SupabaseClient,
}

impl DepartmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// All departments, newest first
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        debug!("Fetching departments");

        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/departments?select=*&order=created_at.desc",
            None,
            None,
        ).await?;

        decode_rows(rows)
    }

    pub async fn create_department(&self, request: CreateDepartmentRequest) -> Result<Department> {
        debug!("Creating department: {}", request.name_en);

        let code = generate_code(&self.supabase, "DEP", "departments").await?;

        let department_data = json!({
            "code": code,
            "name_ar": request.name_ar,
            "name_en": request.name_en,
            "description_ar": request.description_ar,
            "description_en": request.description_en,
            "is_active": request.is_active.unwrap_or(true),
        });

        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/departments",
            None,
            Some(department_data),
            Some(return_representation()),
        ).await?;

        let department: Department = first_row(rows, "department")?;
        debug!("Department created with code {}", department.code);
        Ok(department)
    }

    pub async fn update_department(
        &self,
        department_id: Uuid,
        request: UpdateDepartmentRequest,
    ) -> Result<Department> {
        debug!("Updating department: {}", department_id);

        let mut update_data = serde_json::Map::new();

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
        if let Some(is_active) = request.is_active {
            update_data.insert("is_active".to_string(), json!(is_active));
        }

        let path = format!("/rest/v1/departments?id=eq.{}", department_id);
        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            None,
            Some(Value::Object(update_data)),
            Some(return_representation()),
        ).await?;

        first_row(rows, "department")
    }

    /// Fails when doctors or services still reference the department.
    pub async fn delete_department(&self, department_id: Uuid) -> Result<()> {
        debug!("Deleting department: {}", department_id);

        let path = format!("/rest/v1/departments?id=eq.{}", department_id);
        self.supabase.execute(Method::DELETE, &path, None, None, None).await
    }
}
