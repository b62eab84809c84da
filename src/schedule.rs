use chrono::NaiveDate;

use crate::config::{MaintenanceConfig, TaskConfig, Thresholds};
use crate::dates;
use crate::records::MaintenanceData;

/// Where a task stands relative to its next due point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Ok,
    DueSoon,
    Overdue,
}

impl DueStatus {
    pub fn label(self) -> &'static str {
        match self {
            DueStatus::Ok => "OK",
            DueStatus::DueSoon => "Due soon",
            DueStatus::Overdue => "OVERDUE",
        }
    }

    /// Overdue or due soon.
    pub fn needs_attention(self) -> bool {
        self != DueStatus::Ok
    }
}

/// Next-due computation for one configured task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueRow {
    pub task: String,
    pub next_due_miles: Option<u64>,
    pub next_due_date: Option<NaiveDate>,
    pub miles_left: Option<i64>,
    pub days_left: Option<i64>,
    pub status: DueStatus,
}

/// The odometer and calendar position that due rows are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub miles: Option<u64>,
    pub date: NaiveDate,
}

impl Reference {
    /// Explicit values win; otherwise the latest odometer reading and today.
    pub fn resolve(data: &MaintenanceData, miles: Option<u64>, date: Option<NaiveDate>) -> Self {
        Reference {
            miles: miles.or_else(|| data.latest_odometer().map(|o| o.miles)),
            date: date.unwrap_or_else(dates::today),
        }
    }
}

/// Due rows for every configured task, in config order.
pub fn build_rows(config: &MaintenanceConfig, data: &MaintenanceData, at: Reference) -> Vec<DueRow> {
    config
        .tasks
        .iter()
        .map(|task| compute(task, data, at, config.thresholds))
        .collect()
}

/// When `task` is next due, anchored at its last logged service or, failing
/// that, at the task's configured starting point.
pub fn compute(task: &TaskConfig, data: &MaintenanceData, at: Reference, thresholds: Thresholds) -> DueRow {
    let (anchor_miles, anchor_date) = match data.last_service_for(&task.name) {
        Some(last) => (last.miles.unwrap_or(0), last.date.unwrap_or(at.date)),
        None => (task.initial_miles, task.initial_date.unwrap_or(at.date)),
    };

    let next_due_miles = task.interval_miles.map(|i| anchor_miles.saturating_add(i));
    let next_due_date = task
        .interval_months
        .filter(|&m| m > 0)
        .map(|m| dates::add_months(anchor_date, m));

    let miles_left = match (next_due_miles, at.miles) {
        (Some(next), Some(current)) => Some(miles_between(current, next)),
        _ => None,
    };
    let days_left = next_due_date.map(|d| (d - at.date).num_days());

    let status = if miles_left.is_some_and(|m| m < 0) || days_left.is_some_and(|d| d < 0) {
        DueStatus::Overdue
    } else if miles_left.is_some_and(|m| m <= thresholds.miles)
        || days_left.is_some_and(|d| d <= thresholds.days)
    {
        DueStatus::DueSoon
    } else {
        DueStatus::Ok
    };

    DueRow {
        task: task.name.clone(),
        next_due_miles,
        next_due_date,
        miles_left,
        days_left,
        status,
    }
}

/// Signed distance from `current` to `target`, saturating at the `i64` range.
pub fn miles_between(current: u64, target: u64) -> i64 {
    let diff = i128::from(target) - i128::from(current);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
