//! Meeting request orchestration.
//!
//! A [`Scheduler`] owns one calendar. `submit` turns a message into a pending
//! request with suggested slots, `confirm` books one of them, `cancel` drops
//! the request. [`SharedScheduler`] serializes access for concurrent callers.

use crate::calendar::{validate_email, Event, EventStatus, EventStore, NewEvent};
use crate::config::{Config, OwnerConfig};
use crate::error::{Result, SchedulerError};
use crate::ids::{EventId, IdGenerator, RequestId, SequentialIds};
use crate::parser::Extractor;
use crate::planner::{AvailabilityPlanner, Slot};
use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source of "now" for availability searches
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Confirmed => "confirmed",
            RequestStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub id: RequestId,
    pub requester_name: String,
    pub requester_email: String,
    pub raw_message: String,
    pub duration_minutes: i64,
    pub purpose: Option<String>,
    pub suggested_slots: Vec<Slot>,
    pub status: RequestStatus,
    /// Set once the request is confirmed
    pub event_id: Option<EventId>,
    pub submitted_at: NaiveDateTime,
}

pub struct Scheduler {
    store: EventStore,
    extractor: Extractor,
    planner: AvailabilityPlanner,
    owner: OwnerConfig,
    requests: BTreeMap<RequestId, MeetingRequest>,
    request_ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Scheduler {
    pub fn new(store: EventStore, extractor: Extractor, planner: AvailabilityPlanner, owner: OwnerConfig) -> Self {
        Self {
            store,
            extractor,
            planner,
            owner,
            requests: BTreeMap::new(),
            request_ids: Box::new(SequentialIds::new()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn from_config(config: &Config, store: EventStore) -> Self {
        Self::new(store, config.extractor(), config.planner(), config.owner.clone())
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_request_ids(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.request_ids = ids;
        self
    }

    /// Extract parameters from `message`, search for slots, and record a pending request
    pub fn submit(&mut self, requester_name: &str, requester_email: &str, message: &str) -> Result<MeetingRequest> {
        if message.trim().is_empty() {
            return Err(SchedulerError::invalid_input("Meeting request message cannot be empty"));
        }
        if !validate_email(requester_email) {
            warn!("Requester email '{}' does not look like an address", requester_email);
        }

        let extraction = self.extractor.extract(message);
        info!(
            "Request from {}: {} minutes, purpose {:?}",
            requester_name, extraction.duration_minutes, extraction.purpose
        );
        if extraction.duration_minutes <= 0 {
            return Err(SchedulerError::invalid_input(format!(
                "Extracted duration must be positive, got {} minutes",
                extraction.duration_minutes
            )));
        }

        let now = self.clock.now();
        let slots = self.planner.find_slots(&self.store, extraction.duration_minutes, now)?;
        if slots.is_empty() {
            return Err(SchedulerError::NoAvailability { horizon_days: self.planner.settings().horizon_days });
        }

        let request = MeetingRequest {
            id: RequestId(self.request_ids.next_id()),
            requester_name: requester_name.to_string(),
            requester_email: requester_email.to_string(),
            raw_message: message.to_string(),
            duration_minutes: extraction.duration_minutes,
            purpose: extraction.purpose,
            suggested_slots: slots,
            status: RequestStatus::Pending,
            event_id: None,
            submitted_at: now,
        };
        debug!("Stored {} with {} suggested slots", request.id, request.suggested_slots.len());
        self.requests.insert(request.id, request.clone());
        Ok(request)
    }

    /// Book the suggested slot at `slot_index` (0-based) for a pending request
    pub fn confirm(&mut self, request_id: RequestId, slot_index: usize) -> Result<Event> {
        let request = self
            .requests
            .get_mut(&request_id)
            .ok_or_else(|| SchedulerError::NotFound(format!("Request {} not found", request_id)))?;

        if request.status != RequestStatus::Pending {
            return Err(SchedulerError::invalid_state(format!(
                "Request {} is {}, only pending requests can be confirmed",
                request_id, request.status
            )));
        }
        let slot = *request.suggested_slots.get(slot_index).ok_or(SchedulerError::IndexOutOfRange {
            index: slot_index,
            len: request.suggested_slots.len(),
        })?;

        let new_event = NewEvent::new(format!("Meeting with {}", request.requester_name), slot.start, slot.end)
            .with_description(request.purpose.clone())
            .with_attendees([request.requester_email.clone(), self.owner.email.clone()])
            .with_status(EventStatus::Confirmed);

        let event = match self.store.add_event(new_event) {
            Ok(event) => event,
            Err(err) => {
                warn!("Could not confirm {} at {}: {}", request_id, slot, err);
                return Err(err);
            }
        };

        request.status = RequestStatus::Confirmed;
        request.event_id = Some(event.id);
        info!("Meeting confirmed: {} with {} at {}", event.id, request.requester_name, slot);
        Ok(event)
    }

    /// Cancel a pending request; cancelling twice is a no-op
    pub fn cancel(&mut self, request_id: RequestId) -> Result<()> {
        let request = self
            .requests
            .get_mut(&request_id)
            .ok_or_else(|| SchedulerError::NotFound(format!("Request {} not found", request_id)))?;

        match request.status {
            RequestStatus::Pending => {
                request.status = RequestStatus::Cancelled;
                info!("Request {} cancelled", request_id);
                Ok(())
            }
            RequestStatus::Cancelled => Ok(()),
            RequestStatus::Confirmed => Err(SchedulerError::invalid_state(format!(
                "Request {} is already confirmed as {}",
                request_id,
                request.event_id.map(|id| id.to_string()).unwrap_or_default()
            ))),
        }
    }

    pub fn request(&self, request_id: RequestId) -> Option<&MeetingRequest> {
        self.requests.get(&request_id)
    }

    /// Pending requests ordered by identifier
    pub fn pending_requests(&self) -> Vec<&MeetingRequest> {
        self.requests.values().filter(|r| r.status == RequestStatus::Pending).collect()
    }

    pub fn list_events(&self, range_start: NaiveDateTime, range_end: NaiveDateTime) -> Vec<Event> {
        self.store.list_events(range_start, range_end)
    }

    pub fn is_free(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.store.is_free(start, end)
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

/// Thread-safe handle; every operation runs under one lock so `confirm`
/// checks and inserts atomically.
#[derive(Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<Scheduler>>,
}

impl SharedScheduler {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { inner: Arc::new(Mutex::new(scheduler)) }
    }

    pub fn lock(&self) -> MutexGuard<'_, Scheduler> {
        // mutations happen only after validation, so a poisoned lock holds consistent state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, requester_name: &str, requester_email: &str, message: &str) -> Result<MeetingRequest> {
        self.lock().submit(requester_name, requester_email, message)
    }

    pub fn confirm(&self, request_id: RequestId, slot_index: usize) -> Result<Event> {
        self.lock().confirm(request_id, slot_index)
    }

    pub fn cancel(&self, request_id: RequestId) -> Result<()> {
        self.lock().cancel(request_id)
    }

    pub fn request(&self, request_id: RequestId) -> Option<MeetingRequest> {
        self.lock().request(request_id).cloned()
    }

    pub fn list_events(&self, range_start: NaiveDateTime, range_end: NaiveDateTime) -> Vec<Event> {
        self.lock().list_events(range_start, range_end)
    }

    pub fn is_free(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.lock().is_free(start, end)
    }
}
