use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// DEPARTMENTS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: Uuid,
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub is_active: Option<bool>,
}

// ==============================================================================
// SERVICES
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Consultation,
    Procedure,
}

impl ServiceType {
    pub fn label_ar(&self) -> &'static str {
        match self {
            ServiceType::Consultation => "استشارة",
            ServiceType::Procedure => "إجراء",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicService {
    pub id: Uuid,
    pub code: String,
    pub department_id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub duration_minutes: i32,
    pub service_type: ServiceType,
    pub price: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub department_id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub duration_minutes: i32,
    pub service_type: ServiceType,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub department_id: Option<Uuid>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub duration_minutes: Option<i32>,
    pub service_type: Option<ServiceType>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorServiceLink {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub service_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ClinicService>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: Uuid,
    pub code: String,
    pub department_id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub specialization_ar: Option<String>,
    pub specialization_en: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_services: Option<Vec<DoctorServiceLink>>,
}

impl Doctor {
    /// English names of the linked services, in link order.
    pub fn service_names_en(&self) -> Vec<String> {
        self.doctor_services
            .iter()
            .flatten()
            .filter_map(|link| link.service.as_ref())
            .map(|service| service.name_en.clone())
            .collect()
    }

    pub fn listing(&self) -> DoctorListing {
        DoctorListing {
            id: self.id,
            display_name: self.name_ar.clone(),
            department: self.department.as_ref().map(|d| d.name_ar.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub department_id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub specialization_ar: Option<String>,
    pub specialization_en: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub department_id: Option<Uuid>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub specialization_ar: Option<String>,
    pub specialization_en: Option<String>,
    pub is_active: Option<bool>,
    /// `Some` replaces every link, `Some(vec![])` clears them, `None` leaves them alone.
    pub service_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleActiveRequest {
    /// State the operator currently sees; the doctor is flipped away from it.
    pub is_active: bool,
}

/// Outcome of creating a doctor: the doctor row exists even when linking failed.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorCreation {
    pub doctor: Doctor,
    pub services_linked: bool,
}

/// Entry of the doctor selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorListing {
    pub id: Uuid,
    pub display_name: String,
    pub department: Option<String>,
}

// ==============================================================================
// DASHBOARD
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub departments: u64,
    pub doctors: u64,
    pub services: u64,
    pub schedules: u64,
}
