use crate::error::{Result, SchedulerError};
use crate::ids::{EventId, IdGenerator, SequentialIds};
use chrono::NaiveDateTime;
use log::{debug, info};

mod calendar_types;
mod calendar_validation;

pub use calendar_types::*;
pub use calendar_validation::*;

/// In-memory calendar that never double-books.
///
/// Events are never removed; cancellation is a status change so the full
/// history stays queryable through [`EventStore::events`].
pub struct EventStore {
    events: Vec<Event>,
    ids: Box<dyn IdGenerator>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::new()))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self { events: Vec::new(), ids }
    }

    /// Insert an event, rejecting it if it overlaps any non-cancelled event
    pub fn add_event(&mut self, new_event: NewEvent) -> Result<Event> {
        validate_title(&new_event.title)?;
        validate_interval(new_event.start, new_event.end)?;

        if new_event.status.blocks_time() {
            if let Some(existing) = self.first_overlap(new_event.start, new_event.end) {
                debug!(
                    "Rejecting '{}' {} - {}: overlaps {}",
                    new_event.title, new_event.start, new_event.end, existing.id
                );
                return Err(SchedulerError::Conflict {
                    start: new_event.start,
                    end: new_event.end,
                    existing: existing.id.to_string(),
                });
            }
        }

        let event = new_event.into_event(EventId(self.ids.next_id()));
        info!(
            "Event added: {} on {}",
            event.title,
            event.start.format("%Y-%m-%d %H:%M")
        );
        self.events.push(event.clone());
        Ok(event)
    }

    /// Non-cancelled events intersecting `[range_start, range_end)`, ordered by start then id
    pub fn list_events(&self, range_start: NaiveDateTime, range_end: NaiveDateTime) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|event| event.status.blocks_time() && event.overlaps(range_start, range_end))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        events
    }

    /// True iff no non-cancelled event overlaps `[start, end)`.
    /// A degenerate interval can never be booked, so it is never free.
    pub fn is_free(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        end > start && self.first_overlap(start, end).is_none()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Every stored event in insertion order, cancelled ones included
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Transition an event's status. Cancelled is terminal.
    pub fn set_status(&mut self, id: EventId, status: EventStatus) -> Result<Event> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| SchedulerError::NotFound(format!("Event {} not found", id)))?;

        if event.status == status {
            return Ok(event.clone());
        }
        if event.status == EventStatus::Cancelled {
            return Err(SchedulerError::invalid_state(format!(
                "Event {} is cancelled and cannot become {}",
                id, status
            )));
        }

        debug!("Event {} status {} -> {}", id, event.status, status);
        event.status = status;
        Ok(event.clone())
    }

    pub fn cancel_event(&mut self, id: EventId) -> Result<Event> {
        self.set_status(id, EventStatus::Cancelled)
    }

    fn first_overlap(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<&Event> {
        self.events
            .iter()
            .find(|event| event.status.blocks_time() && event.overlaps(start, end))
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
