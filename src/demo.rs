//! Demo calendar seeding.
//!
//! Produces a believable working-week calendar without randomness: every choice
//! is a pure function of the day offset, so two runs on the same date match.

use crate::calendar::{EventStore, NewEvent};
use crate::error::SchedulerError;
use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use log::debug;

const EVENT_TITLES: [&str; 10] = [
    "Team Standup",
    "Client Meeting",
    "Code Review",
    "Project Planning",
    "1-on-1 with Manager",
    "Design Review",
    "Architecture Discussion",
    "Sprint Retrospective",
    "Product Demo",
    "Training Session",
];

const DURATIONS: [i64; 3] = [30, 60, 90];

/// Candidate demo events for `days` days starting at `first_day`, weekends skipped
pub fn demo_events(first_day: NaiveDate, days: u32) -> Vec<NewEvent> {
    let mut events = Vec::new();
    for offset in 0..days as usize {
        let Some(day) = first_day.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let meetings = 2 + (offset * 7) % 3;
        for i in 0..meetings {
            // i * 5 mod 8 is distinct for i < 4, so hours never repeat within a day
            let hour = 9 + ((offset * 3 + i * 5) % 8) as u32;
            let Some(start) = day.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let minutes = DURATIONS[(offset + i) % DURATIONS.len()];
            let title = EVENT_TITLES[(offset * 4 + i * 3) % EVENT_TITLES.len()];
            let attendee = format!("user{}@company.com", 1 + (offset + i) % 5);

            events.push(
                NewEvent::new(title, start, start + Duration::minutes(minutes)).with_attendees([attendee]),
            );
        }
    }
    events
}

/// Insert the demo events, skipping any that would double-book. Returns how many were stored.
pub fn seed_demo_calendar(store: &mut EventStore, first_day: NaiveDate, days: u32) -> Result<usize, SchedulerError> {
    let mut seeded = 0;
    for event in demo_events(first_day, days) {
        match store.add_event(event) {
            Ok(_) => seeded += 1,
            Err(SchedulerError::Conflict { start, existing, .. }) => {
                debug!("Skipping demo event at {}: overlaps {}", start, existing);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(seeded)
}
