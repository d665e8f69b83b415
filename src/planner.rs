//! Availability search over a bounded horizon of working days.

use crate::calendar::EventStore;
use crate::config::hhmm;
use crate::error::{Result, SchedulerError};
use chrono::{Datelike, Days, Duration, NaiveDateTime, NaiveTime, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_STEP_MINUTES: i64 = 24 * 60;

/// A candidate half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, duration_minutes: i64) -> Self {
        Self { start, end: start + Duration::minutes(duration_minutes) }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.format("%Y-%m-%d %H:%M"), self.end.format("%H:%M"))
    }
}

/// Daily window in which slots may be proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl WorkingHours {
    pub fn span_minutes(&self) -> i64 {
        (self.close - self.open).num_minutes()
    }
}

/// Everything a single availability search needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub duration_minutes: i64,
    pub search_start: NaiveDateTime,
    pub horizon_days: u32,
    pub working_hours: WorkingHours,
    pub working_days: Vec<Weekday>,
    pub step_minutes: i64,
    /// Whether a slot may end exactly at closing time
    pub allow_end_at_close: bool,
    pub max_suggestions: usize,
}

/// Scan day by day from `search_start` and collect free slots in chronological order.
///
/// Returned slots never overlap an active event or each other. An empty result
/// means no availability, not an error.
pub fn find_slots(store: &EventStore, query: &SlotQuery) -> Result<Vec<Slot>> {
    if query.duration_minutes <= 0 {
        return Err(SchedulerError::invalid_input(format!(
            "Meeting duration must be positive, got {} minutes",
            query.duration_minutes
        )));
    }
    if query.step_minutes <= 0 || query.step_minutes > MAX_STEP_MINUTES {
        return Err(SchedulerError::invalid_input(format!(
            "Slot step must be between 1 and {} minutes, got {}",
            MAX_STEP_MINUTES, query.step_minutes
        )));
    }
    let hours = query.working_hours;
    if hours.open >= hours.close {
        return Err(SchedulerError::invalid_input(format!(
            "Working hours start {} must be before end {}",
            hours.open, hours.close
        )));
    }

    let mut slots = Vec::new();
    if query.max_suggestions == 0 {
        return Ok(slots);
    }
    if query.duration_minutes > hours.span_minutes() {
        debug!(
            "{} minute meeting does not fit a {} minute working day",
            query.duration_minutes,
            hours.span_minutes()
        );
        return Ok(slots);
    }

    let duration = Duration::minutes(query.duration_minutes);
    let step = Duration::minutes(query.step_minutes);
    let mut earliest = query.search_start;

    for offset in 0..query.horizon_days {
        let Some(day) = query.search_start.date().checked_add_days(Days::new(offset.into())) else {
            break;
        };
        if !query.working_days.contains(&day.weekday()) {
            continue;
        }

        let close = day.and_time(hours.close);
        let mut candidate = day.and_time(hours.open);
        loop {
            let end = candidate + duration;
            let fits = if query.allow_end_at_close { end <= close } else { end < close };
            if !fits {
                break;
            }
            if candidate >= earliest && store.is_free(candidate, end) {
                slots.push(Slot { start: candidate, end });
                if slots.len() >= query.max_suggestions {
                    return Ok(slots);
                }
                earliest = end;
            }
            candidate += step;
        }
    }

    Ok(slots)
}

/// Planner policy, also the `[scheduling]` section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    #[serde(with = "hhmm")]
    pub working_hours_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub working_hours_end: NaiveTime,
    pub working_days: Vec<Weekday>,
    pub horizon_days: u32,
    pub max_suggestions: usize,
    pub slot_step_minutes: i64,
    pub allow_end_at_close: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            working_hours_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            working_hours_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            working_days: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
            horizon_days: 14,
            max_suggestions: 5,
            slot_step_minutes: 60,
            allow_end_at_close: true,
        }
    }
}

impl PlannerSettings {
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours { open: self.working_hours_start, close: self.working_hours_end }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityPlanner {
    settings: PlannerSettings,
}

impl AvailabilityPlanner {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn query(&self, duration_minutes: i64, search_start: NaiveDateTime) -> SlotQuery {
        SlotQuery {
            duration_minutes,
            search_start,
            horizon_days: self.settings.horizon_days,
            working_hours: self.settings.working_hours(),
            working_days: self.settings.working_days.clone(),
            step_minutes: self.settings.slot_step_minutes,
            allow_end_at_close: self.settings.allow_end_at_close,
            max_suggestions: self.settings.max_suggestions,
        }
    }

    pub fn find_slots(
        &self,
        store: &EventStore,
        duration_minutes: i64,
        search_start: NaiveDateTime,
    ) -> Result<Vec<Slot>> {
        find_slots(store, &self.query(duration_minutes, search_start))
    }
}
