use std::env;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::warn;

pub const DEFAULT_CLINIC_TIMEZONE: Tz = chrono_tz::Asia::Dubai;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Preferred bearer for console calls; falls back to the anon key when empty.
    pub supabase_service_key: String,
    pub clinic_timezone: Tz,
    /// Freezes the clinic's "today" when set, for demos and replays.
    pub clinic_today: Option<NaiveDate>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .unwrap_or_default(),
            clinic_timezone: env::var("CLINIC_TIMEZONE")
                .ok()
                .and_then(|name| match name.parse::<Tz>() {
                    Ok(tz) => Some(tz),
                    Err(_) => {
                        warn!("CLINIC_TIMEZONE '{}' is not a known time zone, using default", name);
                        None
                    }
                })
                .unwrap_or(DEFAULT_CLINIC_TIMEZONE),
            clinic_today: env::var("CLINIC_TODAY")
                .ok()
                .and_then(|raw| match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                    Ok(date) => Some(date),
                    Err(_) => {
                        warn!("CLINIC_TODAY '{}' is not a YYYY-MM-DD date, ignoring", raw);
                        None
                    }
                }),
            port: env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    /// Key sent as the bearer token on every store request.
    pub fn bearer_key(&self) -> &str {
        if self.supabase_service_key.is_empty() {
            &self.supabase_anon_key
        } else {
            &self.supabase_service_key
        }
    }
}
