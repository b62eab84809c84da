use std::cmp::Ordering;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One odometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OdometerReading {
    pub date: NaiveDate,
    pub miles: u64,
}

/// One performed service, as stored in `maintenance_data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub miles: Option<u64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl ServiceRecord {
    /// Ordering by task, then date, then miles, with missing values last.
    pub fn cmp_by_task(&self, other: &Self) -> Ordering {
        self.task
            .cmp(&other.task)
            .then_with(|| none_last(&self.date, &other.date))
            .then_with(|| none_last(&self.miles, &other.miles))
    }

    /// Key used to pick the most recent service: date, then miles.
    /// Entries without a value rank lowest.
    pub fn recency(&self) -> (Option<NaiveDate>, Option<u64>) {
        (self.date, self.miles)
    }
}

fn none_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Contents of `maintenance_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceData {
    #[serde(default)]
    pub odometer: Vec<OdometerReading>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

impl MaintenanceData {
    /// Load the data file; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the data file as 2-space indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Latest odometer reading by date, then miles.
    pub fn latest_odometer(&self) -> Option<&OdometerReading> {
        self.odometer.iter().max()
    }

    /// Most recent service whose task matches `name`, ignoring case.
    pub fn last_service_for(&self, name: &str) -> Option<&ServiceRecord> {
        let name = name.to_lowercase();
        self.services
            .iter()
            .filter(|s| s.task.to_lowercase() == name)
            .max_by_key(|s| s.recency())
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
