use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates;
use crate::records::ServiceRecord;
use crate::schedule::miles_between;

/// Margin used for sorting when a reminder has neither a miles nor a days
/// margin.
pub const NO_MARGIN: i64 = 999_999;

const UNKNOWN_VEHICLE: &str = "Unknown Vehicle";

/// Contents of `schedule_rules.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleRules {
    #[serde(default = "unknown_vehicle")]
    pub vehicle_name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn unknown_vehicle() -> String {
    UNKNOWN_VEHICLE.to_string()
}

impl Default for ScheduleRules {
    fn default() -> Self {
        ScheduleRules {
            vehicle_name: unknown_vehicle(),
            rules: Vec::new(),
        }
    }
}

/// A recurring service recognised by keywords in the CSV's service text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub key: String,
    pub label: String,
    #[serde(rename = "match")]
    pub keywords: Vec<String>,
    pub miles_interval: u64,
    pub months_interval: u32,
    pub trigger: Trigger,
    pub note: String,
}

/// Which limits count towards a rule's due point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Trigger {
    /// Whichever of the miles or months limit comes first.
    #[default]
    Earliest,
    /// Miles only; the months interval is ignored.
    MileageOnly,
}

impl From<String> for Trigger {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "mileage_only" => Trigger::MileageOnly,
            _ => Trigger::Earliest,
        }
    }
}

impl Trigger {
    pub fn label(self) -> &'static str {
        match self {
            Trigger::Earliest => "earliest",
            Trigger::MileageOnly => "mileage_only",
        }
    }
}

impl ScheduleRules {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Rules file not found: {}", path.display());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse rules file: {}", path.display()))
    }
}

impl Rule {
    /// Label, then key, then a placeholder.
    pub fn name(&self) -> &str {
        [self.label.as_str(), self.key.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("(unnamed)")
    }

    /// Whether any keyword occurs in `service`, ignoring case.
    pub fn matches(&self, service: &str) -> bool {
        let service = service.to_lowercase();
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && service.contains(&k))
    }

    /// The latest matching service, ordered by date then miles.
    pub fn last_event<'a>(&self, services: &'a [ServiceRecord]) -> Option<&'a ServiceRecord> {
        services
            .iter()
            .filter(|s| self.matches(&s.task))
            .max_by_key(|s| s.recency())
    }
}

/// Where one rule stands at the given odometer and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub name: String,
    pub trigger: Trigger,
    pub note: String,
    pub miles_interval: u64,
    pub months_interval: u32,
    pub last: Option<ServiceRecord>,
    pub due_miles: Option<u64>,
    pub due_date: Option<NaiveDate>,
    pub miles_until: Option<i64>,
    pub days_until: Option<i64>,
}

impl Reminder {
    /// A margin at or below zero means the service is overdue.
    pub fn is_overdue(&self) -> bool {
        self.miles_until.is_some_and(|m| m <= 0) || self.days_until.is_some_and(|d| d <= 0)
    }

    /// The smaller of the two margins, mixing miles and days.
    pub fn urgency(&self) -> i64 {
        [self.miles_until, self.days_until]
            .into_iter()
            .flatten()
            .fold(NO_MARGIN, i64::min)
    }
}

/// Evaluate one rule.
///
/// With a matching service the due point is that service plus the
/// intervals. Without one, a miles rule is due at its interval and a
/// time-based rule is due today.
pub fn evaluate(rule: &Rule, services: &[ServiceRecord], miles: u64, today: NaiveDate) -> Reminder {
    let miles_interval = (rule.miles_interval > 0).then_some(rule.miles_interval);
    let months_interval = match rule.trigger {
        Trigger::Earliest => (rule.months_interval > 0).then_some(rule.months_interval),
        Trigger::MileageOnly => None,
    };
    let last = rule.last_event(services);

    let (due_miles, due_date) = match last {
        Some(last) => (
            miles_interval.zip(last.miles).map(|(i, m)| m.saturating_add(i)),
            months_interval
                .zip(last.date)
                .map(|(i, d)| dates::add_months(d, i)),
        ),
        None => (miles_interval, months_interval.map(|_| today)),
    };

    Reminder {
        name: rule.name().to_string(),
        trigger: rule.trigger,
        note: rule.note.clone(),
        miles_interval: rule.miles_interval,
        months_interval: rule.months_interval,
        last: last.cloned(),
        due_miles,
        due_date,
        miles_until: due_miles.map(|due| miles_between(miles, due)),
        days_until: due_date.map(|d| (d - today).num_days()),
    }
}

/// Evaluate every rule, overdue first, then by smallest margin.
pub fn reminders(rules: &ScheduleRules, services: &[ServiceRecord], miles: u64, today: NaiveDate) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = rules
        .rules
        .iter()
        .map(|rule| evaluate(rule, services, miles, today))
        .collect();
    reminders.sort_by_key(|r| (!r.is_overdue(), r.urgency()));
    reminders
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
