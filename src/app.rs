use crate::calendar::EventStore;
use crate::config::Config;
use crate::demo::seed_demo_calendar;
use crate::export::export_calendar;
use crate::ids::RequestId;
use crate::report;
use crate::scheduler::{Clock, Scheduler, SystemClock};
use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDateTime};
use rustyline::DefaultEditor;
use std::path::Path;

const DEMO_DAYS: u32 = 14;

const SAMPLE_REQUESTS: [(&str, &str, &str); 3] = [
    (
        "John Smith",
        "john.smith@client.com",
        "Hi, I'd like to discuss the Q1 project proposal. Can we meet for an hour?",
    ),
    (
        "Sarah Johnson",
        "sarah.j@partner.com",
        "Need to talk about the API integration. 30 minutes should be enough.",
    ),
    (
        "Mike Chen",
        "mike.chen@startup.io",
        "Can we have a quick 45-minute meeting regarding the partnership opportunity?",
    ),
];

/// What the terminal should do after a line has been handled
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit,
}

/// Terminal line split into a command and its arguments, honoring double quotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs {
    pub command: String,
    pub args: Vec<String>,
}

impl CommandArgs {
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in input.replace('\u{a0}', " ").chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    if !in_quotes {
                        parts.push(std::mem::take(&mut current));
                    }
                }
                c if c.is_whitespace() && !in_quotes => {
                    if !current.is_empty() {
                        parts.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            }
        }
        if in_quotes {
            return Err(anyhow!("Unterminated quote"));
        }
        if !current.is_empty() {
            parts.push(current);
        }

        if parts.is_empty() {
            return Err(anyhow!("No command provided"));
        }
        let command = parts.remove(0).to_lowercase();
        Ok(CommandArgs { command, args: parts })
    }
}

pub struct Application {
    scheduler: Scheduler,
}

impl Application {
    /// Application over a demo calendar seeded from today
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Box<dyn Clock>) -> Result<Self> {
        let today = clock.now().date();
        let mut store = EventStore::new();
        let seeded = seed_demo_calendar(&mut store, today, DEMO_DAYS)?;
        log::info!("Seeded demo calendar with {} events", seeded);
        let scheduler = Scheduler::from_config(config, store).with_clock(clock);
        Ok(Self { scheduler })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting meetslot terminal");
        let mut rl = DefaultEditor::new()?;

        println!("Welcome to meetslot! Type 'help' for commands.");
        loop {
            match rl.readline("📅 ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.as_str());
                    match self.execute(&line) {
                        Ok(Outcome::Continue(output)) => println!("{}", output.trim_end()),
                        Ok(Outcome::Exit) => break,
                        Err(err) => {
                            log::debug!("Command failed: {:?}", err);
                            println!("❌ {}", err);
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handle one terminal line
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let args = CommandArgs::parse(line)?;
        let output = match args.command.as_str() {
            "request" => {
                let [name, email, message] = args.args.as_slice() else {
                    return Err(anyhow!("Usage: request \"<name>\" <email> \"<message>\""));
                };
                self.request(name, email, message)?
            }
            "confirm" => {
                let [request_id, slot] = args.args.as_slice() else {
                    return Err(anyhow!("Usage: confirm <request-id> <slot-number>"));
                };
                let request_id = parse_request_id(request_id)?;
                let slot: usize = slot.parse().map_err(|_| anyhow!("Invalid slot number: {}", slot))?;
                self.confirm(request_id, slot)?
            }
            "cancel" => {
                let [request_id] = args.args.as_slice() else {
                    return Err(anyhow!("Usage: cancel <request-id>"));
                };
                let request_id = parse_request_id(request_id)?;
                self.scheduler.cancel(request_id)?;
                format!("Request {} cancelled", request_id)
            }
            "pending" => {
                let pending = self.scheduler.pending_requests();
                if pending.is_empty() {
                    "No pending requests".to_string()
                } else {
                    pending.into_iter().map(report::request_summary).collect::<Vec<_>>().join("\n")
                }
            }
            "calendar" => {
                let days = match args.args.first() {
                    Some(days) => days.parse().map_err(|_| anyhow!("Invalid number of days: {}", days))?,
                    None => 7,
                };
                self.calendar(days)
            }
            "help" => help_text(),
            "exit" | "quit" => return Ok(Outcome::Exit),
            other => return Err(anyhow!("Unknown command '{}'. Type 'help' for available commands.", other)),
        };
        Ok(Outcome::Continue(output))
    }

    pub fn request(&mut self, name: &str, email: &str, message: &str) -> Result<String> {
        let request = self.scheduler.submit(name, email, message)?;
        Ok(report::request_summary(&request))
    }

    /// Confirm using the 1-based slot number shown to the user
    pub fn confirm(&mut self, request_id: RequestId, slot_number: usize) -> Result<String> {
        let index = slot_number.checked_sub(1).ok_or_else(|| anyhow!("Slot numbers start at 1"))?;
        let event = self.scheduler.confirm(request_id, index)?;
        Ok(report::confirmation(&event))
    }

    pub fn calendar(&self, days: u32) -> String {
        let (start, end) = window(self.scheduler.now(), days);
        report::calendar_view(&self.scheduler.list_events(start, end), days)
    }

    /// Three sample requests, each confirming a different slot
    pub fn run_demo(&mut self, export: Option<&Path>) -> Result<String> {
        let mut out = String::new();
        out.push_str(&self.calendar(7));
        out.push_str("\n\nSIMULATING MEETING REQUESTS\n");
        out.push_str(&"=".repeat(60));
        out.push('\n');

        for (slot_number, (name, email, message)) in (1..).zip(SAMPLE_REQUESTS) {
            out.push_str(&format!("\nProcessing meeting request from {}\nMessage: {}\n", name, message));
            let request = match self.scheduler.submit(name, email, message) {
                Ok(request) => request,
                Err(err) => {
                    out.push_str(&format!("❌ {}\n", err));
                    continue;
                }
            };
            out.push_str(&report::request_summary(&request));
            match self.confirm(request.id, slot_number) {
                Ok(confirmation) => out.push_str(&confirmation),
                Err(err) => out.push_str(&format!("❌ {}", err)),
            }
            out.push('\n');
        }

        out.push_str("\n\n");
        out.push_str(&self.calendar(7));

        if let Some(path) = export {
            export_calendar(self.scheduler.store(), path)?;
            out.push_str(&format!("\n✓ Calendar exported to {}\n", path.display()));
        }
        Ok(out)
    }
}

fn parse_request_id(raw: &str) -> Result<RequestId> {
    raw.parse().map_err(|_| anyhow!("Invalid request id: {}", raw))
}

/// From midnight of `now`'s date, `days` days forward
fn window(now: NaiveDateTime, days: u32) -> (NaiveDateTime, NaiveDateTime) {
    let start = now.date().and_time(chrono::NaiveTime::MIN);
    let end = start.checked_add_days(Days::new(days.into())).unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

fn help_text() -> String {
    [
        "Available commands:",
        "  request \"<name>\" <email> \"<message>\" - Suggest slots for a meeting request",
        "  confirm <request-id> <slot-number>   - Book one of the suggested slots",
        "  cancel <request-id>                  - Cancel a pending request",
        "  pending                              - List pending requests",
        "  calendar [days]                      - Show upcoming events (default 7 days)",
        "  help                                 - Show this help",
        "  exit                                 - Exit the application",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FixedClock, RequestStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn app() -> Application {
        // Saturday morning, so slot search begins on Monday
        let now = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap().and_hms_opt(8, 0, 0).unwrap();
        Application::with_clock(&Config::default(), Box::new(FixedClock(now))).unwrap()
    }

    #[test]
    fn test_command_args_parse() {
        let args = CommandArgs::parse("request \"John Smith\" john@client.com \"quick call about X\"").unwrap();
        assert_eq!(
            args,
            CommandArgs {
                command: "request".to_string(),
                args: vec![
                    "John Smith".to_string(),
                    "john@client.com".to_string(),
                    "quick call about X".to_string()
                ],
            }
        );
        assert!(CommandArgs::parse("   ").is_err());
        assert!(CommandArgs::parse("request \"unterminated").is_err());
    }

    #[test]
    fn test_request_confirm_flow() {
        let mut app = app();
        let output = app.execute("request \"Jane Doe\" jane@client.com \"quick call about the budget\"").unwrap();
        let Outcome::Continue(text) = output else { panic!("unexpected exit") };
        assert!(text.contains("Request req_1"));
        assert!(text.contains("Purpose: the budget"));
        assert!(text.contains("1. "));

        let output = app.execute("confirm req_1 2").unwrap();
        assert!(matches!(output, Outcome::Continue(ref text) if text.contains("Meeting Confirmed")));
        assert_eq!(app.scheduler().request(RequestId(1)).unwrap().status, RequestStatus::Confirmed);

        assert!(app.execute("confirm req_1 1").is_err());
        assert!(app.execute("confirm 1 0").is_err());
    }

    #[test]
    fn test_cancel_and_pending() {
        let mut app = app();
        app.execute("request Ann ann@x.com \"an hour about hiring\"").unwrap();
        let Outcome::Continue(text) = app.execute("pending").unwrap() else { panic!("unexpected exit") };
        assert!(text.contains("req_1"));

        app.execute("cancel 1").unwrap();
        assert_eq!(app.execute("pending").unwrap(), Outcome::Continue("No pending requests".to_string()));
    }

    #[test]
    fn test_unknown_and_exit() {
        let mut app = app();
        assert!(app.execute("frobnicate").is_err());
        assert!(app.execute("confirm").is_err());
        assert_eq!(app.execute("exit").unwrap(), Outcome::Exit);
    }

    #[test]
    fn test_run_demo_books_three_meetings() {
        let mut app = app();
        let before = app.scheduler().store().len();
        let output = app.run_demo(None).unwrap();
        assert_eq!(output.matches("Meeting Confirmed").count(), 3);
        assert_eq!(app.scheduler().store().len(), before + 3);
    }
}
