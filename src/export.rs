use crate::calendar::{Event, EventStore};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::Path;

/// JSON snapshot of a calendar, cancelled events included
#[derive(Debug, Serialize)]
pub struct CalendarExport<'a> {
    pub events: &'a [Event],
    pub total_events: usize,
}

impl<'a> CalendarExport<'a> {
    pub fn new(store: &'a EventStore) -> Self {
        Self { events: store.events(), total_events: store.len() }
    }
}

pub fn to_json(store: &EventStore) -> Result<String> {
    serde_json::to_string_pretty(&CalendarExport::new(store)).context("Failed to serialize calendar")
}

pub fn export_calendar(store: &EventStore, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &CalendarExport::new(store))?;
    log::info!("Calendar exported to {}", path.display());
    Ok(())
}
