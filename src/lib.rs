pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod export;
pub mod ids;
pub mod parser;
pub mod planner;
pub mod report;
pub mod scheduler;

// Re-export commonly used types
pub use calendar::{Event, EventStatus, EventStore, NewEvent};
pub use config::Config;
pub use error::SchedulerError;
pub use ids::{EventId, RequestId};
pub use parser::{Extraction, Extractor};
pub use planner::{AvailabilityPlanner, Slot, SlotQuery};
pub use scheduler::{MeetingRequest, RequestStatus, Scheduler, SharedScheduler};
