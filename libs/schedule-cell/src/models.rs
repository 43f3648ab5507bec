use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;
use shared_utils::time::{format_hhmm, format_time_display, minutes_since_midnight, serde_hhmm};

use crate::services::slots::slot_count;

pub const ORDERING_MESSAGE: &str = "وقت البداية يجب أن يكون قبل وقت النهاية";
pub const DUPLICATE_MESSAGE: &str = "يوجد موعد مكرر في هذا الوقت";

// ==============================================================================
// TIME WINDOWS
// ==============================================================================

/// Slot granularity offered by the console.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub enum SlotDuration {
    Fifteen,
    Thirty,
    FortyFive,
    Sixty,
}

impl SlotDuration {
    pub fn minutes(&self) -> u32 {
        match self {
            SlotDuration::Fifteen => 15,
            SlotDuration::Thirty => 30,
            SlotDuration::FortyFive => 45,
            SlotDuration::Sixty => 60,
        }
    }
}

impl Default for SlotDuration {
    fn default() -> Self {
        SlotDuration::Thirty
    }
}

impl TryFrom<u32> for SlotDuration {
    type Error = ScheduleError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            15 => Ok(SlotDuration::Fifteen),
            30 => Ok(SlotDuration::Thirty),
            45 => Ok(SlotDuration::FortyFive),
            60 => Ok(SlotDuration::Sixty),
            other => Err(ScheduleError::Validation(format!(
                "مدة الموعد يجب أن تكون 15 أو 30 أو 45 أو 60 دقيقة (وصلت {})",
                other
            ))),
        }
    }
}

impl From<SlotDuration> for u32 {
    fn from(duration: SlotDuration) -> Self {
        duration.minutes()
    }
}

/// One row of `doctor_schedules`: a working period of one doctor on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_date: NaiveDate,
    #[serde(with = "serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration_minutes: SlotDuration,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_available() -> bool {
    true
}

impl TimeWindow {
    pub fn slot_count(&self) -> u32 {
        slot_count(
            minutes_since_midnight(self.start_time),
            minutes_since_midnight(self.end_time),
            self.slot_duration_minutes.minutes(),
        )
    }

    /// Half-open intersection; windows that only touch do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && start < self.end_time
    }

    pub fn same_range(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time == start && self.end_time == end
    }

    /// `"09:00 - 17:00"`
    pub fn label(&self) -> String {
        format!("{} - {}", format_hhmm(self.start_time), format_hhmm(self.end_time))
    }

    pub fn display_label(&self) -> String {
        format!(
            "{} - {}",
            format_time_display(self.start_time),
            format_time_display(self.end_time)
        )
    }
}

/// A window to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeWindowInput {
    pub doctor_id: Uuid,
    pub schedule_date: NaiveDate,
    #[serde(with = "serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration_minutes: SlotDuration,
    pub notes: Option<String>,
}

impl TimeWindowInput {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.start_time >= self.end_time {
            return Err(ScheduleError::Validation(ORDERING_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Whitespace-only notes are stored as null.
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string)
    }
}

/// Result of a successful add or delete, carrying the doctor's re-listed windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowChange {
    pub message: String,
    pub window: Option<TimeWindow>,
    pub removed_id: Option<Uuid>,
    /// `None` when the mutation went through but the re-list failed.
    pub windows: Option<Vec<TimeWindow>>,
}

// ==============================================================================
// DAY VIEW
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowView {
    #[serde(flatten)]
    pub window: TimeWindow,
    pub slot_count: u32,
    pub display_label: String,
}

impl From<&TimeWindow> for WindowView {
    fn from(window: &TimeWindow) -> Self {
        Self {
            slot_count: window.slot_count(),
            display_label: window.display_label(),
            window: window.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayView {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selectable: bool,
    pub windows: Vec<WindowView>,
    pub total_slots: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    #[serde(with = "serde_hhmm")]
    pub start: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub end: NaiveTime,
}

/// Live feedback for a draft that has not been submitted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftPreview {
    pub slot_count: u32,
    pub slots: Vec<Slot>,
    pub validation: Option<String>,
    pub can_submit: bool,
}

// ==============================================================================
// SUMMARY
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryWindow {
    pub date: NaiveDate,
    pub weekday: String,
    #[serde(with = "serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration_minutes: u32,
    pub slot_count: u32,
}

impl From<&TimeWindow> for SummaryWindow {
    fn from(window: &TimeWindow) -> Self {
        Self {
            date: window.schedule_date,
            weekday: window.schedule_date.format("%A").to_string(),
            start_time: window.start_time,
            end_time: window.end_time,
            slot_duration_minutes: window.slot_duration_minutes.minutes(),
            slot_count: window.slot_count(),
        }
    }
}

/// What the assistant is told about one doctor's coming week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorScheduleSummary {
    pub doctor_id: Uuid,
    pub name_en: String,
    pub name_ar: String,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub services: Vec<String>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub windows: Vec<SummaryWindow>,
}

impl DoctorScheduleSummary {
    pub fn to_prompt_text(&self) -> String {
        let services = if self.services.is_empty() {
            "None".to_string()
        } else {
            self.services.join(", ")
        };

        let mut lines = vec![
            format!("Doctor: {}", self.name_en),
            format!("Department: {}", self.department.as_deref().unwrap_or("N/A")),
            format!("Specialization: {}", self.specialization.as_deref().unwrap_or("N/A")),
            format!("Services: {}", services),
            format!("Available Slots: {} time periods this week", self.windows.len()),
        ];

        lines.extend(self.windows.iter().map(|w| {
            format!(
                "{} {} {}-{} ({} x {}min)",
                w.date.format("%Y-%m-%d"),
                w.weekday,
                format_hhmm(w.start_time),
                format_hhmm(w.end_time),
                w.slot_count,
                w.slot_duration_minutes
            )
        }));

        lines.join("\n")
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

/// Which console action a failure belongs to; selects the generic failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Load,
    Add,
    Delete,
}

impl ScheduleAction {
    pub fn failure_message(&self) -> &'static str {
        match self {
            ScheduleAction::Load => "خطأ في تحميل الجدول",
            ScheduleAction::Add => "خطأ في إضافة الفترة",
            ScheduleAction::Delete => "خطأ في حذف الفترة",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot add availability to past date {0}")]
    PastDate(NaiveDate),

    #[error("An identical window already exists")]
    Duplicate,

    #[error("Window overlaps existing window {start}-{end}")]
    Overlap { start: NaiveTime, end: NaiveTime },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl ScheduleError {
    pub fn user_message(&self, action: ScheduleAction) -> String {
        match self {
            ScheduleError::Validation(msg) => msg.clone(),
            ScheduleError::PastDate(_) => "لا يمكن إضافة فترات عمل لتاريخ سابق".to_string(),
            ScheduleError::Duplicate => DUPLICATE_MESSAGE.to_string(),
            ScheduleError::Overlap { start, end } => format!(
                "الفترة تتداخل مع فترة موجودة ({} - {})",
                format_hhmm(*start),
                format_hhmm(*end)
            ),
            ScheduleError::NotFound(_) => "الطبيب غير موجود".to_string(),
            ScheduleError::Store(_) => action.failure_message().to_string(),
        }
    }

    pub fn into_app_error(self, action: ScheduleAction) -> AppError {
        let message = self.user_message(action);
        match self {
            ScheduleError::Validation(_) | ScheduleError::PastDate(_) => AppError::ValidationError(message),
            ScheduleError::Duplicate | ScheduleError::Overlap { .. } => AppError::Conflict(message),
            ScheduleError::NotFound(_) => AppError::NotFound(message),
            ScheduleError::Store(_) => AppError::ExternalService(message),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        err.into_app_error(ScheduleAction::Load)
    }
}
