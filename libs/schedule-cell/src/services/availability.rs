use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};
use shared_database::DatabaseError;
use shared_utils::time::format_hhmm;

use crate::models::{ScheduleError, TimeWindow, TimeWindowInput};

const TABLE_PATH: &str = "/rest/v1/doctor_schedules";

/// Persistence boundary for availability windows. Every call names its doctor.
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Ordered by date then start time. `None` yields an empty list without touching the store.
    async fn list(&self, doctor_id: Option<Uuid>) -> Result<Vec<TimeWindow>, ScheduleError>;

    /// Inclusive on both ends.
    async fn list_range(
        &self,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeWindow>, ScheduleError>;

    async fn create(&self, input: TimeWindowInput) -> Result<TimeWindow, ScheduleError>;

    /// Scoped to one doctor and date; an id outside that scope is left alone.
    /// Deleting an id that no longer exists succeeds.
    async fn delete(&self, doctor_id: Uuid, date: NaiveDate, window_id: Uuid) -> Result<(), ScheduleError>;
}

pub struct AvailabilityStore {
    supabase: SupabaseClient,
}

impl AvailabilityStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<TimeWindow>, ScheduleError> {
        let rows: Vec<Value> = self.supabase
            .request(Method::GET, path, None, None)
            .await
            .map_err(store_error)?;

        decode_windows(rows)
    }

    async fn windows_on(&self, doctor_id: Uuid, date: NaiveDate) -> Result<Vec<TimeWindow>, ScheduleError> {
        let path = format!(
            "{}?select=*&doctor_id=eq.{}&schedule_date=eq.{}&order=start_time.asc",
            TABLE_PATH, doctor_id, date
        );
        self.fetch(&path).await
    }
}

#[async_trait]
impl WindowStore for AvailabilityStore {
    async fn list(&self, doctor_id: Option<Uuid>) -> Result<Vec<TimeWindow>, ScheduleError> {
        let Some(doctor_id) = doctor_id else {
            return Ok(Vec::new());
        };

        debug!("Fetching schedules for doctor: {}", doctor_id);

        let path = format!(
            "{}?select=*&doctor_id=eq.{}&order=schedule_date.asc,start_time.asc",
            TABLE_PATH, doctor_id
        );
        self.fetch(&path).await
    }

    async fn list_range(
        &self,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeWindow>, ScheduleError> {
        debug!("Fetching schedules for doctor {} between {} and {}", doctor_id, from, to);

        let path = format!(
            "{}?select=*&doctor_id=eq.{}&schedule_date=gte.{}&schedule_date=lte.{}&order=schedule_date.asc,start_time.asc",
            TABLE_PATH, doctor_id, from, to
        );
        self.fetch(&path).await
    }

    async fn create(&self, input: TimeWindowInput) -> Result<TimeWindow, ScheduleError> {
        debug!(
            "Creating schedule for doctor {} on {} ({}-{})",
            input.doctor_id,
            input.schedule_date,
            format_hhmm(input.start_time),
            format_hhmm(input.end_time)
        );

        input.validate()?;

        // The unique constraint only catches exact duplicates; overlaps are checked here.
        let existing = self.windows_on(input.doctor_id, input.schedule_date).await?;
        check_conflicts(&existing, &input)?;

        let window_data = json!({
            "doctor_id": input.doctor_id,
            "schedule_date": input.schedule_date,
            "start_time": format_hhmm(input.start_time),
            "end_time": format_hhmm(input.end_time),
            "slot_duration_minutes": input.slot_duration_minutes,
            "is_available": true,
            "notes": input.normalized_notes(),
        });

        let rows: Vec<Value> = self.supabase
            .request_with_headers(
                Method::POST,
                TABLE_PATH,
                None,
                Some(window_data),
                Some(return_representation()),
            )
            .await
            .map_err(store_error)?;

        let window = decode_windows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| ScheduleError::Store("Insert returned no row".to_string()))?;

        debug!("Schedule created with ID: {}", window.id);
        Ok(window)
    }

    async fn delete(&self, doctor_id: Uuid, date: NaiveDate, window_id: Uuid) -> Result<(), ScheduleError> {
        debug!("Deleting schedule {} for doctor {} on {}", window_id, doctor_id, date);

        let path = format!(
            "{}?id=eq.{}&doctor_id=eq.{}&schedule_date=eq.{}",
            TABLE_PATH, window_id, doctor_id, date
        );
        self.supabase
            .execute(Method::DELETE, &path, None, None, None)
            .await
            .map_err(store_error)
    }
}

/// An exact match is a duplicate; any other intersection is an overlap.
pub fn check_conflicts(existing: &[TimeWindow], input: &TimeWindowInput) -> Result<(), ScheduleError> {
    let same_day = existing
        .iter()
        .filter(|w| w.doctor_id == input.doctor_id && w.schedule_date == input.schedule_date);

    let mut overlap = None;
    for window in same_day {
        if window.same_range(input.start_time, input.end_time) {
            return Err(ScheduleError::Duplicate);
        }
        if overlap.is_none() && window.overlaps(input.start_time, input.end_time) {
            overlap = Some(ScheduleError::Overlap {
                start: window.start_time,
                end: window.end_time,
            });
        }
    }

    match overlap {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn store_error(err: anyhow::Error) -> ScheduleError {
    match err.downcast_ref::<DatabaseError>() {
        Some(DatabaseError::UniqueViolation { .. }) => ScheduleError::Duplicate,
        _ => {
            warn!("Schedule store call failed: {}", err);
            ScheduleError::Store(err.to_string())
        }
    }
}

fn decode_windows(rows: Vec<Value>) -> Result<Vec<TimeWindow>, ScheduleError> {
    rows.into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<TimeWindow>, _>>()
        .map_err(|e| ScheduleError::Store(format!("Malformed schedule row: {}", e)))
}
