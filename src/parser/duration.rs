//! Duration rules.
//!
//! Rules are evaluated in table order and the first one that yields a value
//! wins, so the numeric "N unit" forms must stay ahead of the vague words.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// How a matched rule turns into minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationValue {
    /// Captured number times a unit multiplier
    PerUnit(i64),
    Fixed(i64),
    /// The configured short-meeting default
    Short,
}

#[derive(Debug)]
pub struct DurationRule {
    pub name: &'static str,
    pattern: Regex,
    pub value: DurationValue,
}

impl DurationRule {
    fn new(name: &'static str, pattern: &str, value: DurationValue) -> Self {
        let pattern = Regex::new(pattern).expect("duration rule pattern is valid");
        Self { name, pattern, value }
    }

    /// Minutes for the first occurrence of this rule that produces a usable value
    pub fn evaluate(&self, text: &str, short_minutes: i64) -> Option<i64> {
        match self.value {
            DurationValue::PerUnit(multiplier) => self
                .pattern
                .captures_iter(text)
                .find_map(|caps| scaled_minutes(caps.get(1)?.as_str(), multiplier)),
            DurationValue::Fixed(minutes) => self.pattern.is_match(text).then_some(minutes),
            DurationValue::Short => self.pattern.is_match(text).then_some(short_minutes),
        }
    }
}

/// Fraction digits beyond this are ignored
const MAX_FRACTION_DIGITS: usize = 6;

/// `count` (possibly decimal, e.g. "1.5") times `multiplier`, rounded half up to whole minutes.
/// `None` on overflow.
fn scaled_minutes(count: &str, multiplier: i64) -> Option<i64> {
    let (whole, fraction) = count.split_once('.').unwrap_or((count, ""));
    let minutes = whole.parse::<i64>().ok()?.checked_mul(multiplier)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if fraction.is_empty() {
        return Some(minutes);
    }
    let numerator = fraction.parse::<i64>().ok()?;
    let denominator = 10_i64.pow(fraction.len() as u32);
    let extra = (numerator.checked_mul(multiplier)?.checked_mul(2)?.checked_add(denominator)?) / (2 * denominator);
    minutes.checked_add(extra)
}

pub static DURATION_RULES: Lazy<Vec<DurationRule>> = Lazy::new(|| {
    vec![
        // a number must not continue a word or another number ("1,5", "2.0.5")
        DurationRule::new(
            "hours",
            r"(?i)(?:^|[^\w.,])(\d+(?:\.\d+)?)\s*-?\s*(?:hours?|hrs?)\b",
            DurationValue::PerUnit(60),
        ),
        DurationRule::new("half-hour", r"(?i)\bhalf[\s-]+(?:an[\s-]+)?hour\b", DurationValue::Fixed(30)),
        DurationRule::new(
            "minutes",
            r"(?i)(?:^|[^\w.,])(\d+(?:\.\d+)?)\s*-?\s*(?:minutes?|mins?)\b",
            DurationValue::PerUnit(1),
        ),
        DurationRule::new("quick", r"(?i)\b(?:quick|brief)\b", DurationValue::Short),
        DurationRule::new("hour", r"(?i)\bhour\b", DurationValue::Fixed(60)),
    ]
});

/// First matching rule's name and minute value
pub fn match_duration(text: &str, short_minutes: i64) -> Option<(&'static str, i64)> {
    DURATION_RULES.iter().find_map(|rule| {
        let minutes = rule.evaluate(text, short_minutes)?;
        debug!("Duration rule '{}' matched: {} minutes", rule.name, minutes);
        Some((rule.name, minutes))
    })
}
