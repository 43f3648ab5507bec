use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{Doctor, DoctorListing};
use crate::services::DoctorService;

/// Read-only doctor lookup consumed by the scheduling side.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn active_doctors(&self) -> Result<Vec<Doctor>>;

    async fn doctor_profile(&self, doctor_id: Uuid) -> Result<Option<Doctor>>;

    async fn listings(&self) -> Result<Vec<DoctorListing>> {
        let doctors = self.active_doctors().await?;
        Ok(doctors.iter().map(Doctor::listing).collect())
    }
}

pub struct SupabaseDoctorDirectory {
    doctors: DoctorService,
}

impl SupabaseDoctorDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            doctors: DoctorService::new(config),
        }
    }
}

#[async_trait]
impl DoctorDirectory for SupabaseDoctorDirectory {
    async fn active_doctors(&self) -> Result<Vec<Doctor>> {
        self.doctors.list_active_doctors().await
    }

    async fn doctor_profile(&self, doctor_id: Uuid) -> Result<Option<Doctor>> {
        self.doctors.get_doctor(doctor_id).await
    }
}
