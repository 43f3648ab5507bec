use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use shared_config::AppConfig;

/// Answers "what day is it at the clinic", independent of the server's own zone.
#[derive(Debug, Clone, Copy)]
pub struct ClinicClock {
    timezone: Tz,
    pinned_today: Option<NaiveDate>,
}

impl ClinicClock {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            pinned_today: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        match config.clinic_today {
            Some(today) => Self::fixed(config.clinic_timezone, today),
            None => Self::new(config.clinic_timezone),
        }
    }

    /// A clock frozen on `today`, for tests and replays.
    pub fn fixed(timezone: Tz, today: NaiveDate) -> Self {
        Self {
            timezone,
            pinned_today: Some(today),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| self.date_of(Utc::now()))
    }

    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestConfig;
    use chrono::TimeZone;

    #[test]
    fn test_date_follows_clinic_zone() {
        let clock = ClinicClock::new(chrono_tz::Asia::Dubai);
        // 21:30 UTC is already the next day in Dubai (UTC+4).
        let instant = Utc.with_ymd_and_hms(2026, 3, 9, 21, 30, 0).unwrap();
        assert_eq!(clock.date_of(instant), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn test_configured_day_pins_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let pinned = TestConfig::default().on_day(today).to_app_config();
        assert_eq!(ClinicClock::from_config(&pinned).today(), today);
    }
}
