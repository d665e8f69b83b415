//! Purpose rules: the clause that follows the first matching trigger phrase.

use super::utils::truncate_chars;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub struct PurposeTrigger {
    pub phrase: &'static str,
    pattern: Regex,
    /// Skip occurrences followed by a duration ("for 30 minutes")
    skip_duration_clause: bool,
}

impl PurposeTrigger {
    fn new(phrase: &'static str, skip_duration_clause: bool) -> Self {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", words.join(r"\s+")))
            .expect("purpose trigger pattern is valid");
        Self { phrase, pattern, skip_duration_clause }
    }
}

pub static PURPOSE_TRIGGERS: Lazy<Vec<PurposeTrigger>> = Lazy::new(|| {
    vec![
        PurposeTrigger::new("to discuss", false),
        PurposeTrigger::new("discuss", false),
        PurposeTrigger::new("talk about", false),
        PurposeTrigger::new("regarding", false),
        PurposeTrigger::new("about", false),
        PurposeTrigger::new("for", true),
    ]
});

const DURATION_PHRASE: &str =
    r"(?:about\s+|around\s+)?(?:an?\s+|\d+(?:\.\d+)?\s*-?\s*|half[\s-]+(?:an[\s-]+)?)(?:hours?|hrs?|minutes?|mins?)\b";

static LEADING_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\s*{}", DURATION_PHRASE)).expect("duration lead pattern is valid")
});

static EMBEDDED_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\s*\b(?:for\s+)?{}", DURATION_PHRASE))
        .expect("embedded duration pattern is valid")
});

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!?;\n]|\.(?:\s|$)").expect("sentence end pattern is valid"));

static TRAILING_FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s,]*\b(?:please|thanks|thank\s+you|thx)$")
        .expect("filler pattern is valid")
});

const EDGE_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':', '-', '"', '\'', '(', ')'];

/// Purpose clause for `text`, or `None` when no trigger yields one
pub fn extract_purpose(text: &str, max_chars: usize) -> Option<String> {
    for trigger in PURPOSE_TRIGGERS.iter() {
        for found in trigger.pattern.find_iter(text) {
            let clause = &text[found.end()..];
            if trigger.skip_duration_clause && LEADING_DURATION.is_match(clause) {
                debug!("Skipping '{}' followed by a duration", trigger.phrase);
                continue;
            }
            if let Some(purpose) = clean_clause(clause, max_chars) {
                debug!("Purpose trigger '{}' matched: '{}'", trigger.phrase, purpose);
                return Some(purpose);
            }
        }
    }
    None
}

fn clean_clause(clause: &str, max_chars: usize) -> Option<String> {
    let mut clause = match SENTENCE_END.find(clause) {
        Some(end) => &clause[..end.start()],
        None => clause,
    };
    if let Some(duration) = EMBEDDED_DURATION.find(clause) {
        clause = &clause[..duration.start()];
    }

    let mut clause = clause.trim_start_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c));
    loop {
        let trimmed = clause.trim_end_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c));
        let trimmed = match TRAILING_FILLER.find(trimmed) {
            Some(filler) => &trimmed[..filler.start()],
            None => trimmed,
        };
        if trimmed.len() == clause.len() {
            break;
        }
        clause = trimmed;
    }

    let purpose = truncate_chars(clause, max_chars).trim_end();
    if purpose.is_empty() {
        None
    } else {
        Some(purpose.to_string())
    }
}
