//! Plain-text rendering of calendars, slots and requests for the terminal.

use crate::calendar::Event;
use crate::planner::Slot;
use crate::scheduler::MeetingRequest;
use chrono::NaiveDate;

const RULE_WIDTH: usize = 60;
const UNKNOWN_PURPOSE: &str = "General Meeting";

/// Events grouped under one header per day
pub fn calendar_view(events: &[Event], days: u32) -> String {
    let mut out = format!("📅 Calendar for next {} days:\n{}\n", days, "=".repeat(RULE_WIDTH));

    if events.is_empty() {
        out.push_str("  (no events)\n");
        return out;
    }

    let mut current_date: Option<NaiveDate> = None;
    for event in events {
        let event_date = event.start.date();
        if current_date != Some(event_date) {
            current_date = Some(event_date);
            out.push_str(&format!("\n{}\n{}\n", event.start.format("%A, %B %d, %Y"), "-".repeat(RULE_WIDTH)));
        }
        out.push_str(&format!(
            "  {} - {} | {}\n",
            event.start.format("%I:%M %p"),
            event.end.format("%I:%M %p"),
            event.title
        ));
    }
    out
}

/// Numbered slot list, starting from 1
pub fn slot_list(slots: &[Slot]) -> String {
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| format!("   {}. {}\n", i + 1, slot.start.format("%A, %B %d, %Y at %I:%M %p")))
        .collect()
}

pub fn request_summary(request: &MeetingRequest) -> String {
    let mut out = format!(
        "📋 Request {} from {} <{}>\n",
        request.id, request.requester_name, request.requester_email
    );
    out.push_str(&format!("   Duration: {} minutes\n", request.duration_minutes));
    out.push_str(&format!(
        "   Purpose: {}\n",
        request.purpose.as_deref().unwrap_or(UNKNOWN_PURPOSE)
    ));
    out.push_str(&format!("   Status: {}\n", request.status));
    if !request.suggested_slots.is_empty() {
        out.push_str("\n💡 Available Time Slots:\n");
        out.push_str(&slot_list(&request.suggested_slots));
    }
    out
}

pub fn confirmation(event: &Event) -> String {
    format!(
        "✅ Meeting Confirmed!\n   {} ({})\n   Time: {}\n   Duration: {} minutes",
        event.title,
        event.id,
        event.start.format("%A, %B %d, %Y at %I:%M %p"),
        event.duration().num_minutes()
    )
}
