//! Heuristic meeting-request parser
//!
//! Derives a duration and a purpose from a free-text message using ordered
//! rule tables. Extraction is deterministic and never fails: when no rule
//! matches, the configured defaults are used.
pub mod duration;
pub mod purpose;
pub mod utils;

use log::debug;
use serde::{Deserialize, Serialize};

pub use duration::{match_duration, DurationRule, DurationValue, DURATION_RULES};
pub use purpose::{extract_purpose, PurposeTrigger, PURPOSE_TRIGGERS};

/// Knobs for the extraction rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub default_duration_minutes: i64,
    pub short_duration_minutes: i64,
    pub purpose_max_length: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self { default_duration_minutes: 60, short_duration_minutes: 15, purpose_max_length: 50 }
    }
}

/// Structured parameters pulled out of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub duration_minutes: i64,
    /// `None` when no purpose could be identified
    pub purpose: Option<String>,
    /// Name of the duration rule that fired, `None` when the default was used
    pub duration_rule: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    settings: ExtractionSettings,
}

impl Extractor {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub fn extract(&self, message: &str) -> Extraction {
        let text = utils::sanitize_user_input(message);

        let (duration_rule, duration_minutes) =
            match match_duration(&text, self.settings.short_duration_minutes) {
                Some((rule, minutes)) => (Some(rule), minutes),
                None => {
                    debug!(
                        "No duration rule matched, using default of {} minutes",
                        self.settings.default_duration_minutes
                    );
                    (None, self.settings.default_duration_minutes)
                }
            };
        let purpose = extract_purpose(&text, self.settings.purpose_max_length);

        Extraction { duration_minutes, purpose, duration_rule }
    }
}
