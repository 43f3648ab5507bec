use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `config` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigUpsert {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertValueRequest {
    pub value: String,
    pub description: Option<String>,
}

/// Branding and assistant settings edited on the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicSettings {
    pub clinic_name_ar: String,
    pub clinic_name_en: String,
    pub clinic_address: String,
    pub clinic_phone: String,
    pub assistant_name_ar: String,
    pub assistant_name_en: String,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub consultation_duration: String,
    pub procedure_duration: String,
    pub google_maps_link: String,
    pub google_review_link: String,
    pub instagram_url: String,
    pub website_url: String,
    pub logo_url: String,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_name_ar: String::new(),
            clinic_name_en: String::new(),
            clinic_address: String::new(),
            clinic_phone: String::new(),
            assistant_name_ar: String::new(),
            assistant_name_en: String::new(),
            working_hours_start: "09:00".to_string(),
            working_hours_end: "20:00".to_string(),
            consultation_duration: "30".to_string(),
            procedure_duration: "60".to_string(),
            google_maps_link: String::new(),
            google_review_link: String::new(),
            instagram_url: String::new(),
            website_url: String::new(),
            logo_url: String::new(),
        }
    }
}

impl ClinicSettings {
    /// Missing or empty rows keep the default value.
    pub fn from_rows(rows: &[ConfigEntry]) -> Self {
        let lookup = |key: &str, fallback: String| -> String {
            rows.iter()
                .find(|row| row.key == key)
                .map(|row| row.value.clone())
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };

        let defaults = Self::default();
        Self {
            clinic_name_ar: lookup("clinic_name_ar", defaults.clinic_name_ar),
            clinic_name_en: lookup("clinic_name_en", defaults.clinic_name_en),
            clinic_address: lookup("clinic_address", defaults.clinic_address),
            clinic_phone: lookup("clinic_phone", defaults.clinic_phone),
            assistant_name_ar: lookup("assistant_name_ar", defaults.assistant_name_ar),
            assistant_name_en: lookup("assistant_name_en", defaults.assistant_name_en),
            working_hours_start: lookup("working_hours_start", defaults.working_hours_start),
            working_hours_end: lookup("working_hours_end", defaults.working_hours_end),
            consultation_duration: lookup("consultation_duration", defaults.consultation_duration),
            procedure_duration: lookup("procedure_duration", defaults.procedure_duration),
            google_maps_link: lookup("google_maps_link", defaults.google_maps_link),
            google_review_link: lookup("google_review_link", defaults.google_review_link),
            instagram_url: lookup("instagram_url", defaults.instagram_url),
            website_url: lookup("website_url", defaults.website_url),
            logo_url: lookup("logo_url", defaults.logo_url),
        }
    }

    pub fn to_rows(&self) -> Vec<ConfigUpsert> {
        let row = |key: &str, value: &str, description: &str| ConfigUpsert {
            key: key.to_string(),
            value: value.to_string(),
            description: Some(description.to_string()),
        };

        vec![
            row("clinic_name_ar", &self.clinic_name_ar, "Clinic name in Arabic"),
            row("clinic_name_en", &self.clinic_name_en, "Clinic name in English"),
            row("clinic_address", &self.clinic_address, "Clinic address"),
            row("clinic_phone", &self.clinic_phone, "Clinic phone number"),
            row("assistant_name_ar", &self.assistant_name_ar, "اسم المساعد الذكي بالعربية"),
            row("assistant_name_en", &self.assistant_name_en, "اسم المساعد الذكي بالإنجليزية"),
            row("working_hours_start", &self.working_hours_start, "Clinic opening time"),
            row("working_hours_end", &self.working_hours_end, "Clinic closing time"),
            row("consultation_duration", &self.consultation_duration, "Consultation duration in minutes"),
            row("procedure_duration", &self.procedure_duration, "Procedure duration in minutes"),
            row("google_maps_link", &self.google_maps_link, "Google Maps link"),
            row("google_review_link", &self.google_review_link, "Google Review link"),
            row("instagram_url", &self.instagram_url, "رابط انستغرام"),
            row("website_url", &self.website_url, "رابط الموقع الإلكتروني"),
            row("logo_url", &self.logo_url, "Logo URL"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> ConfigEntry {
        ConfigEntry {
            key: key.to_string(),
            value: value.to_string(),
            description: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_from_rows_keeps_defaults_for_missing_and_empty() {
        let rows = vec![
            entry("clinic_name_en", "Amber Clinic"),
            entry("working_hours_end", ""),
        ];

        let settings = ClinicSettings::from_rows(&rows);

        assert_eq!(settings.clinic_name_en, "Amber Clinic");
        assert_eq!(settings.working_hours_start, "09:00");
        assert_eq!(settings.working_hours_end, "20:00");
        assert_eq!(settings.procedure_duration, "60");
    }

    #[test]
    fn test_to_rows_covers_every_field() {
        let rows = ClinicSettings::default().to_rows();

        assert_eq!(rows.len(), 15);
        assert!(rows.iter().all(|row| row.description.is_some()));
        assert!(rows.iter().any(|row| row.key == "logo_url"));
    }
}
