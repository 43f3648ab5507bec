use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_utils::time::{parse_hhmm, serde_hhmm};

use crate::models::{
    DayView, DraftPreview, ScheduleError, SlotDuration, TimeWindow, TimeWindowInput, WindowChange,
    WindowView, ORDERING_MESSAGE,
};
use crate::services::availability::WindowStore;
use crate::services::calendar::DayState;
use crate::services::slots::{slot_count_between, slot_starts};

pub const ADDED_MESSAGE: &str = "تم إضافة فترة العمل بنجاح";
pub const DELETED_MESSAGE: &str = "تم حذف الفترة بنجاح";

/// The add-window form. Start, end and duration stick between submissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayDraft {
    #[serde(with = "serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "serde_hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration: SlotDuration,
    pub notes: String,
}

impl Default for DayDraft {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            slot_duration: SlotDuration::default(),
            notes: String::new(),
        }
    }
}

impl DayDraft {
    pub fn preview(&self) -> u32 {
        slot_count_between(self.start_time, self.end_time, self.slot_duration.minutes())
    }

    pub fn validation(&self) -> Option<&'static str> {
        if self.start_time >= self.end_time {
            Some(ORDERING_MESSAGE)
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validation().is_none()
    }

    pub fn after_success(&mut self) {
        self.notes.clear();
    }

    pub fn preview_details(&self) -> DraftPreview {
        DraftPreview {
            slot_count: self.preview(),
            slots: slot_starts(self.start_time, self.end_time, self.slot_duration.minutes()),
            validation: self.validation().map(str::to_string),
            can_submit: self.can_submit(),
        }
    }

    pub fn to_input(&self, doctor_id: Uuid, date: NaiveDate) -> TimeWindowInput {
        TimeWindowInput {
            doctor_id,
            schedule_date: date,
            start_time: self.start_time,
            end_time: self.end_time,
            slot_duration_minutes: self.slot_duration,
            notes: Some(self.notes.clone()),
        }
    }
}

/// Form fields as submitted; missing fields take the form defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowDraftRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub slot_duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl WindowDraftRequest {
    pub fn into_draft(self) -> Result<DayDraft, ScheduleError> {
        let defaults = DayDraft::default();

        let parse = |raw: Option<String>, fallback: NaiveTime| -> Result<NaiveTime, ScheduleError> {
            match raw {
                Some(raw) => parse_hhmm(&raw).map_err(|e| ScheduleError::Validation(e.to_string())),
                None => Ok(fallback),
            }
        };

        Ok(DayDraft {
            start_time: parse(self.start_time, defaults.start_time)?,
            end_time: parse(self.end_time, defaults.end_time)?,
            slot_duration: match self.slot_duration_minutes {
                Some(minutes) => SlotDuration::try_from(minutes)?,
                None => defaults.slot_duration,
            },
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// Add and delete for one doctor on one date.
pub struct DayEditor<S: WindowStore> {
    store: S,
    doctor_id: Uuid,
    date: NaiveDate,
    windows: Vec<TimeWindow>,
    pending_delete: Option<Uuid>,
}

impl<S: WindowStore> DayEditor<S> {
    pub fn new(store: S, doctor_id: Uuid, date: NaiveDate) -> Self {
        Self {
            store,
            doctor_id,
            date,
            windows: Vec::new(),
            pending_delete: None,
        }
    }

    /// Keeps only this doctor's windows on this date, ordered by start.
    pub fn open(&mut self, windows: &[TimeWindow]) {
        self.windows = windows
            .iter()
            .filter(|w| w.doctor_id == self.doctor_id && w.schedule_date == self.date)
            .cloned()
            .collect();
        self.windows.sort_by_key(|w| w.start_time);
    }

    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn view(&self, today: NaiveDate) -> DayView {
        let state = DayState::classify(
            true,
            self.date == today,
            self.date < today,
            !self.windows.is_empty(),
        );
        let windows: Vec<WindowView> = self.windows.iter().map(WindowView::from).collect();

        DayView {
            doctor_id: self.doctor_id,
            date: self.date,
            is_today: self.date == today,
            is_past: self.date < today,
            is_selectable: state.is_selectable(),
            total_slots: windows.iter().map(|w| w.slot_count).sum(),
            windows,
        }
    }

    /// Rejects past dates and inverted ranges before the store sees anything.
    pub async fn add_window(&mut self, draft: &mut DayDraft, today: NaiveDate) -> Result<WindowChange, ScheduleError> {
        if self.date < today {
            return Err(ScheduleError::PastDate(self.date));
        }
        if let Some(message) = draft.validation() {
            return Err(ScheduleError::Validation(message.to_string()));
        }

        let window = self.store.create(draft.to_input(self.doctor_id, self.date)).await?;
        debug!("Added window {} for doctor {} on {}", window.id, self.doctor_id, self.date);

        draft.after_success();
        let windows = self.refresh().await;

        Ok(WindowChange {
            message: ADDED_MESSAGE.to_string(),
            window: Some(window),
            removed_id: None,
            windows,
        })
    }

    pub fn request_delete(&mut self, window_id: Uuid) {
        self.pending_delete = Some(window_id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Clears the pending id whether or not the delete succeeds.
    pub async fn confirm_delete(&mut self) -> Result<WindowChange, ScheduleError> {
        let window_id = self
            .pending_delete
            .take()
            .ok_or_else(|| ScheduleError::Validation("No window selected for deletion".to_string()))?;

        self.store.delete(self.doctor_id, self.date, window_id).await?;
        debug!("Deleted window {} for doctor {}", window_id, self.doctor_id);

        let windows = self.refresh().await;

        Ok(WindowChange {
            message: DELETED_MESSAGE.to_string(),
            window: None,
            removed_id: Some(window_id),
            windows,
        })
    }

    async fn refresh(&mut self) -> Option<Vec<TimeWindow>> {
        match self.store.list(Some(self.doctor_id)).await {
            Ok(all) => {
                self.open(&all);
                Some(all)
            }
            Err(e) => {
                warn!("Re-listing schedules for doctor {} failed: {}", self.doctor_id, e);
                None
            }
        }
    }
}
