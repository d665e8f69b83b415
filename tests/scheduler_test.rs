use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use meetslot::demo::seed_demo_calendar;
use meetslot::scheduler::FixedClock;
use meetslot::{Config, EventStatus, EventStore, RequestStatus, Scheduler, SchedulerError, SharedScheduler};
use pretty_assertions::assert_eq;
use std::thread;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

fn seeded_scheduler(now: NaiveDateTime) -> Result<Scheduler> {
    let mut store = EventStore::new();
    seed_demo_calendar(&mut store, now.date(), 14)?;
    Ok(Scheduler::from_config(&Config::default(), store).with_clock(Box::new(FixedClock(now))))
}

#[test]
fn test_suggested_slots_respect_calendar() -> Result<()> {
    let now = at(monday(), 8, 0);
    let mut scheduler = seeded_scheduler(now)?;
    let open = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

    for message in [
        "Hi, I'd like to discuss the Q1 project proposal. Can we meet for an hour?",
        "Need to talk about the API integration. 30 minutes should be enough.",
        "Can we have a quick 45-minute meeting regarding the partnership opportunity?",
        "a 2 hour workshop to discuss the roadmap",
    ] {
        let request = scheduler.submit("Tester", "tester@client.com", message)?;
        assert!(!request.suggested_slots.is_empty(), "no slots for {:?}", message);

        for (i, slot) in request.suggested_slots.iter().enumerate() {
            assert_eq!(slot.duration(), Duration::minutes(request.duration_minutes));
            assert!(slot.start >= now);
            assert!(scheduler.is_free(slot.start, slot.end), "{} is busy", slot);
            assert!(slot.start.time() >= open && slot.end.time() <= close);
            assert_eq!(slot.start.date(), slot.end.date());
            assert!(!matches!(slot.start.weekday(), Weekday::Sat | Weekday::Sun));
            for other in &request.suggested_slots[i + 1..] {
                assert!(other.start >= slot.end, "{} overlaps {}", slot, other);
            }
        }
    }
    Ok(())
}

#[test]
fn test_sample_requests_extract_duration_and_purpose() -> Result<()> {
    let mut scheduler = seeded_scheduler(at(monday(), 8, 0))?;

    let first = scheduler.submit(
        "John Smith",
        "john.smith@client.com",
        "Hi, I'd like to discuss the Q1 project proposal. Can we meet for an hour?",
    )?;
    assert_eq!(first.duration_minutes, 60);
    assert_eq!(first.purpose.as_deref(), Some("the Q1 project proposal"));

    let second = scheduler.submit(
        "Sarah Johnson",
        "sarah.j@partner.com",
        "Need to talk about the API integration. 30 minutes should be enough.",
    )?;
    assert_eq!(second.duration_minutes, 30);
    assert_eq!(second.purpose.as_deref(), Some("the API integration"));

    let third = scheduler.submit(
        "Mike Chen",
        "mike.chen@startup.io",
        "Can we have a quick 45-minute meeting regarding the partnership opportunity?",
    )?;
    assert_eq!(third.duration_minutes, 45);
    assert_eq!(third.purpose.as_deref(), Some("the partnership opportunity"));
    Ok(())
}

#[test]
fn test_decimal_duration_sizes_suggested_slots() -> Result<()> {
    let now = at(monday(), 8, 0);
    let mut scheduler =
        Scheduler::from_config(&Config::default(), EventStore::new()).with_clock(Box::new(FixedClock(now)));

    let request = scheduler.submit("A", "a@client.com", "Can we meet for 1.5 hours?")?;
    assert_eq!(request.duration_minutes, 90);
    assert_eq!(request.suggested_slots[0].start, at(monday(), 9, 0));
    assert_eq!(request.suggested_slots[0].end, at(monday(), 10, 30));
    Ok(())
}

#[test]
fn test_end_to_end_booking() -> Result<()> {
    let mut scheduler = seeded_scheduler(at(monday(), 8, 0))?;
    let before = scheduler.store().len();

    let request = scheduler.submit("Jane Doe", "jane@client.com", "30 minutes to discuss the contract")?;
    let slot = request.suggested_slots[0];
    let event = scheduler.confirm(request.id, 0)?;

    assert_eq!(scheduler.store().len(), before + 1);
    assert_eq!(event.status, EventStatus::Confirmed);
    assert_eq!(scheduler.request(request.id).map(|r| r.status), Some(RequestStatus::Confirmed));

    let listed = scheduler.list_events(slot.start, slot.end);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, event.id);

    // the booked slot is no longer offered
    let next = scheduler.submit("Jane Doe", "jane@client.com", "30 minutes to discuss the follow-up")?;
    assert!(next.suggested_slots.iter().all(|s| s.end <= slot.start || s.start >= slot.end));
    Ok(())
}

#[test]
fn test_concurrent_confirm_of_same_slot() -> Result<()> {
    let now = at(monday(), 8, 0);
    let shared = SharedScheduler::new(
        Scheduler::from_config(&Config::default(), EventStore::new()).with_clock(Box::new(FixedClock(now))),
    );

    let first = shared.submit("A", "a@client.com", "an hour about hiring")?;
    let second = shared.submit("B", "b@client.com", "an hour about budgets")?;
    assert_eq!(first.suggested_slots[0], second.suggested_slots[0]);

    let handles: Vec<_> = [first.id, second.id]
        .into_iter()
        .map(|request_id| {
            let shared = shared.clone();
            thread::spawn(move || shared.confirm(request_id, 0))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let booked = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results.iter().filter(|r| matches!(r, Err(SchedulerError::Conflict { .. }))).count();
    assert_eq!((booked, conflicts), (1, 1));

    let slot = first.suggested_slots[0];
    assert_eq!(shared.list_events(slot.start, slot.end).len(), 1);
    assert!(!shared.is_free(slot.start, slot.end));

    let statuses: Vec<_> = [first.id, second.id]
        .iter()
        .filter_map(|id| shared.request(*id).map(|r| r.status))
        .collect();
    assert!(statuses.contains(&RequestStatus::Confirmed));
    assert!(statuses.contains(&RequestStatus::Pending));
    Ok(())
}

#[test]
fn test_concurrent_submissions_get_unique_ids() {
    let shared = SharedScheduler::new(
        Scheduler::from_config(&Config::default(), EventStore::new())
            .with_clock(Box::new(FixedClock(at(monday(), 8, 0)))),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || shared.submit(&format!("User {}", i), "user@client.com", "quick sync about X"))
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().unwrap().id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(shared.lock().pending_requests().len(), 8);
}

#[test]
fn test_fully_booked_horizon_reports_no_availability() -> Result<()> {
    let now = at(monday(), 8, 0);
    let mut store = EventStore::new();
    for offset in 0..14 {
        let day = monday() + Duration::days(offset);
        store.add_event(meetslot::NewEvent::new("Blocked", at(day, 9, 0), at(day, 17, 0)))?;
    }
    let mut scheduler = Scheduler::from_config(&Config::default(), store).with_clock(Box::new(FixedClock(now)));

    let err = scheduler.submit("A", "a@client.com", "quick sync").unwrap_err();
    assert_eq!(err, SchedulerError::NoAvailability { horizon_days: 14 });
    assert!(scheduler.pending_requests().is_empty());
    Ok(())
}
