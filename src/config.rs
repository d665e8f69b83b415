use crate::parser::{ExtractionSettings, Extractor};
use crate::planner::{AvailabilityPlanner, PlannerSettings};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scheduling: PlannerSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub owner: OwnerConfig,
}

/// The person whose calendar is being booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerConfig {
    pub name: String,
    pub email: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self { name: "Calendar Owner".to_string(), email: "owner@company.com".to_string() }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }
        Self::load_from(&config_path)
    }

    /// Load a file named on the command line; unlike `load`, a missing file is an error
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("config file {} not found", path.display()));
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let scheduling = &self.scheduling;
        if scheduling.working_hours_start >= scheduling.working_hours_end {
            return Err(anyhow!(
                "working_hours_start ({}) must be before working_hours_end ({})",
                scheduling.working_hours_start.format("%H:%M"),
                scheduling.working_hours_end.format("%H:%M")
            ));
        }
        if scheduling.horizon_days == 0 {
            return Err(anyhow!("horizon_days must be at least 1"));
        }
        if scheduling.max_suggestions == 0 {
            return Err(anyhow!("max_suggestions must be at least 1"));
        }
        if scheduling.slot_step_minutes <= 0 || scheduling.slot_step_minutes > 24 * 60 {
            return Err(anyhow!("slot_step_minutes must be between 1 and 1440"));
        }

        let extraction = &self.extraction;
        if extraction.default_duration_minutes <= 0 {
            return Err(anyhow!("default_duration_minutes must be positive"));
        }
        if extraction.short_duration_minutes <= 0 {
            return Err(anyhow!("short_duration_minutes must be positive"));
        }
        if extraction.purpose_max_length == 0 {
            return Err(anyhow!("purpose_max_length must be at least 1"));
        }
        Ok(())
    }

    pub fn planner(&self) -> AvailabilityPlanner {
        AvailabilityPlanner::new(self.scheduling.clone())
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.extraction.clone())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "meetslot", "meetslot")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `HH:MM` (de)serialization for working-hour boundaries
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
