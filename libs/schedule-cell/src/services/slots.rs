use chrono::{Duration, NaiveTime};

use shared_utils::time::minutes_since_midnight;

use crate::models::Slot;

/// Whole slots of `duration_min` that fit in `[start_min, end_min)`.
pub fn slot_count(start_min: u32, end_min: u32, duration_min: u32) -> u32 {
    if end_min <= start_min || duration_min == 0 {
        return 0;
    }
    (end_min - start_min) / duration_min
}

pub fn slot_count_between(start: NaiveTime, end: NaiveTime, duration_min: u32) -> u32 {
    slot_count(minutes_since_midnight(start), minutes_since_midnight(end), duration_min)
}

/// The concrete slots, back to back from `start`; a trailing remainder is dropped.
pub fn slot_starts(start: NaiveTime, end: NaiveTime, duration_min: u32) -> Vec<Slot> {
    let step = Duration::minutes(i64::from(duration_min));

    (0..slot_count_between(start, end, duration_min))
        .map(|index| {
            let slot_start = start + step * index as i32;
            Slot {
                start: slot_start,
                end: slot_start + step,
            }
        })
        .collect()
}
