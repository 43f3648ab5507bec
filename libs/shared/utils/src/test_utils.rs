use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_key: String,
    pub clinic_timezone: Tz,
    pub clinic_today: Option<NaiveDate>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            supabase_service_key: "test-service-key".to_string(),
            clinic_timezone: chrono_tz::Asia::Dubai,
            clinic_today: None,
        }
    }
}

impl TestConfig {
    /// Points the store at a `wiremock::MockServer` uri.
    pub fn with_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    /// Pins the clinic's "today" so date-sensitive routes are reproducible.
    pub fn on_day(mut self, today: NaiveDate) -> Self {
        self.clinic_today = Some(today);
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            clinic_timezone: self.clinic_timezone,
            clinic_today: self.clinic_today,
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn schedule_row(doctor_id: &str, date: &str, start: &str, end: &str, duration: u32) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "schedule_date": date,
            "start_time": format!("{}:00", start),
            "end_time": format!("{}:00", end),
            "slot_duration_minutes": duration,
            "is_available": true,
            "notes": null,
            "created_at": "2026-01-01T00:00:00+00:00"
        })
    }

    pub fn department_row(id: &str, code: &str) -> Value {
        json!({
            "id": id,
            "code": code,
            "name_ar": "الجلدية",
            "name_en": "Dermatology",
            "description_ar": null,
            "description_en": null,
            "is_active": true,
            "created_at": "2026-01-01T00:00:00+00:00"
        })
    }

    pub fn doctor_row(id: &str, code: &str, department_id: &str) -> Value {
        json!({
            "id": id,
            "code": code,
            "department_id": department_id,
            "name_ar": "د. سارة",
            "name_en": "Dr. Sara",
            "specialization_ar": "جلدية تجميلية",
            "specialization_en": "Cosmetic Dermatology",
            "is_active": true,
            "created_at": "2026-01-01T00:00:00+00:00",
            "department": Self::department_row(department_id, "DEP-0001"),
            "doctor_services": []
        })
    }

    pub fn service_row(id: &str, code: &str, department_id: &str) -> Value {
        json!({
            "id": id,
            "code": code,
            "department_id": department_id,
            "name_ar": "تنظيف البشرة",
            "name_en": "Facial Cleansing",
            "description_ar": null,
            "description_en": null,
            "duration_minutes": 45,
            "service_type": "procedure",
            "price": 350.0,
            "is_active": true,
            "created_at": "2026-01-01T00:00:00+00:00"
        })
    }

    pub fn config_row(key: &str, value: &str) -> Value {
        json!({
            "key": key,
            "value": value,
            "description": null,
            "updated_at": "2026-01-01T00:00:00+00:00"
        })
    }

    pub fn unique_violation() -> Value {
        json!({
            "code": "23505",
            "details": "Key already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint"
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "code": code,
            "details": null,
            "hint": null,
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let app_config = TestConfig::with_url("http://127.0.0.1:9999").to_app_config();

        assert_eq!(app_config.supabase_url, "http://127.0.0.1:9999");
        assert_eq!(app_config.supabase_anon_key, "test-anon-key");
        assert_eq!(app_config.bearer_key(), "test-service-key");
    }

    #[test]
    fn test_schedule_row_uses_store_time_format() {
        let row = MockSupabaseResponses::schedule_row("doc", "2026-10-20", "09:00", "17:00", 30);
        assert_eq!(row["start_time"], "09:00:00");
        assert_eq!(row["slot_duration_minutes"], 30);
    }
}
