use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ScheduleError, TimeWindow};

/// Previews shown inside a cell before collapsing into `+N`.
pub const MAX_CELL_PREVIEWS: usize = 2;

pub const WEEKDAYS_AR: [&str; 7] = ["الأحد", "الإثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت"];
pub const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

/// The month currently on screen, held as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedMonth {
    first_day: NaiveDate,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ScheduleError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| ScheduleError::Validation(format!("Invalid month {}-{}", year, month)))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn next(&self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }

    pub fn previous(&self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn title_en(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn title_ar(&self) -> String {
        format!("{} {}", MONTHS_AR[self.first_day.month0() as usize], self.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    FutureEmpty,
    FutureScheduled,
    TodayEmpty,
    TodayScheduled,
    Past,
    OtherMonth,
}

impl DayState {
    /// Past days stay `Past` even when they belong to an adjacent month.
    pub fn classify(is_current_month: bool, is_today: bool, is_past: bool, has_windows: bool) -> Self {
        match (is_past, is_current_month, is_today, has_windows) {
            (true, _, _, _) => DayState::Past,
            (false, false, _, _) => DayState::OtherMonth,
            (false, true, true, false) => DayState::TodayEmpty,
            (false, true, true, true) => DayState::TodayScheduled,
            (false, true, false, false) => DayState::FutureEmpty,
            (false, true, false, true) => DayState::FutureScheduled,
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            DayState::FutureEmpty
                | DayState::FutureScheduled
                | DayState::TodayEmpty
                | DayState::TodayScheduled
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub state: DayState,
    pub is_selectable: bool,
    pub previews: Vec<String>,
    pub overflow: usize,
    pub windows: Vec<TimeWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub title_ar: String,
    pub title_en: String,
    pub weekdays_ar: Vec<String>,
    pub weekdays_en: Vec<String>,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|cell| cell.date == date)
    }
}

pub struct CalendarProjector;

impl CalendarProjector {
    /// Lays `windows` onto full Sunday-to-Saturday weeks covering `month`.
    pub fn project(windows: &[TimeWindow], month: DisplayedMonth, today: NaiveDate) -> MonthGrid {
        let mut by_date: BTreeMap<NaiveDate, Vec<TimeWindow>> = BTreeMap::new();
        for window in windows {
            by_date.entry(window.schedule_date).or_default().push(window.clone());
        }

        let days = grid_dates(month)
            .into_iter()
            .map(|date| {
                let mut day_windows = by_date.remove(&date).unwrap_or_default();
                day_windows.sort_by_key(|w| w.start_time);
                build_cell(date, day_windows, month, today)
            })
            .collect();

        MonthGrid {
            year: month.year(),
            month: month.month(),
            title_ar: month.title_ar(),
            title_en: month.title_en(),
            weekdays_ar: WEEKDAYS_AR.iter().map(|d| d.to_string()).collect(),
            weekdays_en: WEEKDAYS_EN.iter().map(|d| d.to_string()).collect(),
            days,
        }
    }
}

fn grid_dates(month: DisplayedMonth) -> Vec<NaiveDate> {
    let first = month.first_day();
    let last = month.last_day();

    let start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_sunday()));

    start.iter_days().take_while(|date| *date <= end).collect()
}

fn build_cell(date: NaiveDate, windows: Vec<TimeWindow>, month: DisplayedMonth, today: NaiveDate) -> DayCell {
    let is_current_month = month.contains(date);
    let is_today = date == today;
    let is_past = date < today;
    let state = DayState::classify(is_current_month, is_today, is_past, !windows.is_empty());

    DayCell {
        date,
        day_of_month: date.day(),
        is_current_month,
        is_today,
        is_past,
        state,
        is_selectable: state.is_selectable(),
        previews: windows.iter().take(MAX_CELL_PREVIEWS).map(TimeWindow::label).collect(),
        overflow: windows.len().saturating_sub(MAX_CELL_PREVIEWS),
        windows,
    }
}
