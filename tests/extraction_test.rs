use meetslot::parser::{ExtractionSettings, Extractor};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("Can we meet for 2 hours to discuss the roadmap?", 120, Some("the roadmap"); "hours with purpose")]
#[test_case("Let's do half an hour about onboarding", 30, Some("onboarding"); "half hour")]
#[test_case("Can we meet for 1.5 hours to discuss the roadmap?", 90, Some("the roadmap"); "decimal hours")]
#[test_case("a 2.5 hour workshop", 150, None; "decimal hour singular")]
#[test_case("a half-an-hour sync about hiring", 30, Some("hiring"); "hyphenated half an hour")]
#[test_case("15 min sync regarding the release", 15, Some("the release"); "abbreviated minutes")]
#[test_case("brief chat", 15, None; "brief without purpose")]
#[test_case("Got an hour for the hiring plan?", 60, Some("the hiring plan"); "bare hour")]
#[test_case("Hello!", 60, None; "defaults")]
#[test_case("a 99999999999999999999 minute call about nothing", 60, Some("nothing"); "overflowing number falls through")]
fn test_extract_messages(message: &str, minutes: i64, purpose: Option<&str>) {
    let extraction = Extractor::default().extract(message);
    assert_eq!(extraction.duration_minutes, minutes);
    assert_eq!(extraction.purpose.as_deref(), purpose);
}

#[test]
fn test_configured_short_duration() {
    let extractor = Extractor::new(ExtractionSettings { short_duration_minutes: 20, ..Default::default() });
    assert_eq!(extractor.extract("quick question").duration_minutes, 20);
    assert_eq!(extractor.extract("quick 45 minute question").duration_minutes, 45);
}
