//! Validation functions for calendar event data.
//
// This module provides validation helpers for event intervals, titles, and emails.

use crate::error::{Result, SchedulerError};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]{1,64}@(?:[A-Za-z0-9-]{1,63}\.){1,125}[A-Za-z]{2,63}$")
        .expect("email pattern is valid")
});

/// Validate that an interval is non-empty and ordered
pub fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= start {
        return Err(SchedulerError::invalid_input(format!(
            "Event end {} must be after start {}",
            end, start
        )));
    }
    Ok(())
}

/// Validate an event title
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(SchedulerError::invalid_input("Event title cannot be empty"));
    }
    Ok(())
}

/// Check an email address for a plausible shape
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && !contains_dangerous_characters(email)
}

/// Check for characters that have no business in an address or attendee name
pub fn contains_dangerous_characters(input: &str) -> bool {
    input.contains(';')
        || input.contains('&')
        || input.contains('|')
        || input.contains('<')
        || input.contains('>')
        || input.contains('$')
}
