//! Calendar event types.

use crate::ids::EventId;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    /// Whether an event in this status occupies its time interval
    pub fn blocks_time(self) -> bool {
        !matches!(self, EventStatus::Cancelled)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventStatus::Confirmed => "confirmed",
            EventStatus::Tentative => "tentative",
            EventStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// A stored calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "start_time")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_time")]
    pub end: NaiveDateTime,
    pub attendees: BTreeSet<String>,
    pub status: EventStatus,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open interval overlap against `[start, end)`
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}

/// An event that has not been assigned an identifier yet
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub attendees: BTreeSet<String>,
    pub status: EventStatus,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            attendees: BTreeSet::new(),
            status: EventStatus::Confirmed,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees.extend(attendees.into_iter().map(Into::into));
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            attendees: self.attendees,
            status: self.status,
        }
    }
}
