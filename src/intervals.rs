/// Default service intervals, matched as substrings of the lower-cased task
/// name. Order matters: the first matching key wins.
const DEFAULT_INTERVALS: &[(&str, u64, u32)] = &[
    ("engine oil", 5_000, 6),
    ("engine oil & filter", 5_000, 6),
    ("oil change", 5_000, 6),
    ("tire rotation", 5_000, 6),
    ("cabin air filter", 15_000, 12),
    ("engine air filter", 30_000, 24),
    ("brake inspection", 5_000, 6),
    ("brake fluid", 30_000, 36),
    ("coolant", 100_000, 120),
    ("transmission fluid", 60_000, 72),
    ("spark plug", 120_000, 120),
];

/// Months between services for tasks with no known interval.
const FALLBACK_MONTHS: u32 = 12;

/// Suggested (miles, months) interval for a task name.
pub fn guess(task: &str) -> (Option<u64>, Option<u32>) {
    let task = task.to_lowercase();
    DEFAULT_INTERVALS
        .iter()
        .find(|(key, _, _)| task.contains(key))
        .map(|&(_, miles, months)| (Some(miles), Some(months)))
        .unwrap_or((None, Some(FALLBACK_MONTHS)))
}

#[cfg(test)]
#[path = "intervals_test.rs"]
mod tests;
