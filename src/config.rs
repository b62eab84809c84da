use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::msg;

/// Contents of `maintenance_config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub year: u16,
    pub make: String,
    pub model: String,
    pub vin: String,
}

impl Default for Vehicle {
    fn default() -> Self {
        Vehicle {
            year: 2018,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            vin: String::new(),
        }
    }
}

/// How close (in miles or days) a task must be to count as "due soon".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub miles: i64,
    pub days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            miles: 500,
            days: 30,
        }
    }
}

/// A recurring maintenance task and where its schedule starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    #[serde(default)]
    pub interval_miles: Option<u64>,
    #[serde(default)]
    pub interval_months: Option<u32>,
    #[serde(default)]
    pub initial_miles: u64,
    #[serde(default)]
    pub initial_date: Option<NaiveDate>,
}

impl MaintenanceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the config if it exists. A file that fails to load is reported
    /// with a warning and treated as absent.
    pub fn load_existing(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load(path) {
            Ok(config) => Some(config),
            Err(err) => {
                msg::warn(&ignored_config_warning(path, &err));
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn ignored_config_warning(path: &Path, err: &anyhow::Error) -> String {
    format!(
        "Ignoring {}: {:#}; using default vehicle and thresholds",
        path.display(),
        err
    )
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
