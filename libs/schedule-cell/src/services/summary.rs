use chrono::{Duration, NaiveDate};
use futures::future::try_join_all;
use tracing::debug;
use uuid::Uuid;

use directory_cell::{Doctor, DoctorDirectory};

use crate::models::{DoctorScheduleSummary, ScheduleError, SummaryWindow};
use crate::services::availability::WindowStore;

/// The summary covers today and the following seven days.
pub const SUMMARY_HORIZON_DAYS: i64 = 7;

pub fn horizon(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(SUMMARY_HORIZON_DAYS))
}

/// Builds the read-only view the assistant consumes.
pub struct SummaryService<D: DoctorDirectory, S: WindowStore> {
    directory: D,
    store: S,
}

impl<D: DoctorDirectory, S: WindowStore> SummaryService<D, S> {
    pub fn new(directory: D, store: S) -> Self {
        Self { directory, store }
    }

    pub async fn summarize(&self, doctor_id: Uuid, today: NaiveDate) -> Result<DoctorScheduleSummary, ScheduleError> {
        let doctor = self.directory
            .doctor_profile(doctor_id)
            .await
            .map_err(|e| ScheduleError::Store(e.to_string()))?
            .ok_or_else(|| ScheduleError::NotFound(format!("doctor {}", doctor_id)))?;

        self.summarize_doctor(&doctor, today).await
    }

    /// Every active doctor, in directory order.
    pub async fn summarize_all(&self, today: NaiveDate) -> Result<Vec<DoctorScheduleSummary>, ScheduleError> {
        let doctors = self.directory
            .active_doctors()
            .await
            .map_err(|e| ScheduleError::Store(e.to_string()))?;

        debug!("Summarizing schedules for {} active doctors", doctors.len());

        try_join_all(doctors.iter().map(|doctor| self.summarize_doctor(doctor, today))).await
    }

    async fn summarize_doctor(&self, doctor: &Doctor, today: NaiveDate) -> Result<DoctorScheduleSummary, ScheduleError> {
        let (from, to) = horizon(today);
        let windows = self.store.list_range(doctor.id, from, to).await?;

        Ok(DoctorScheduleSummary {
            doctor_id: doctor.id,
            name_en: doctor.name_en.clone(),
            name_ar: doctor.name_ar.clone(),
            department: doctor.department.as_ref().map(|d| d.name_en.clone()),
            specialization: doctor.specialization_en.clone(),
            services: doctor.service_names_en(),
            from,
            to,
            windows: windows
                .iter()
                .filter(|w| w.schedule_date >= from && w.schedule_date <= to)
                .map(SummaryWindow::from)
                .collect(),
        })
    }
}
