//! Wall-clock helpers for the `"HH:MM"` strings exchanged with the store and the console.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time '{0}', expected HH:MM")]
    Invalid(String),
}

/// Parses `"HH:MM"`, also accepting the `"HH:MM:SS"` form Postgres `time` columns return.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| TimeParseError::Invalid(value.to_string()))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// 12-hour display used in the Arabic console, e.g. `9:00 ص`, `5:30 م`.
pub fn format_time_display(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "م" } else { "ص" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

/// Serde adapter for `NaiveTime` fields stored as `"HH:MM"`.
pub mod serde_hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(D::Error::custom)
    }
}
