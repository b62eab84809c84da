use chrono::NaiveDate;

use crate::dates::{self, ISO_FORMAT};
use crate::rules::Reminder;
use crate::schedule::DueRow;

const HEADER: &str = "TASK | Next Due (Miles) | Next Due (Date) | Miles Left | Days Left | Status";
const SEPARATOR: &str =
    "-----|------------------:|-----------------|-----------:|----------:|--------";
const MISSING: &str = "—";

/// Render due rows as a pipe table.
pub fn render(rows: &[DueRow]) -> String {
    let mut lines = vec![HEADER.to_string(), SEPARATOR.to_string()];
    for row in rows {
        lines.push(format!(
            "{} | {} | {} | {} | {} | {}",
            row.task,
            show(row.next_due_miles),
            show(row.next_due_date.map(|d| d.format(ISO_FORMAT))),
            show(row.miles_left),
            show(row.days_left),
            row.status.label(),
        ));
    }
    lines.join("\n")
}

/// Render rule reminders as text blocks, one per rule, in the given order.
pub fn render_reminders(vehicle: &str, miles: u64, today: NaiveDate, reminders: &[Reminder]) -> String {
    let mut lines = vec![
        vehicle.to_string(),
        format!("Reminders as of {} | Odometer: {} mi", dates::format_us(today), miles),
        "-".repeat(70),
    ];
    if reminders.is_empty() {
        lines.push("No rules found.".to_string());
    }

    for r in reminders {
        let mut due = Vec::new();
        if let (Some(at), Some(left)) = (r.due_miles, r.miles_until) {
            due.push(format!("due @ {} mi (in {} mi)", at, left));
        }
        if let (Some(by), Some(left)) = (r.due_date, r.days_until) {
            due.push(format!("due by {} (in {} days)", by.format(ISO_FORMAT), left));
        }
        if due.is_empty() {
            due.push("no computed due point (check rule intervals)".to_string());
        }

        let status = if r.is_overdue() { "OVERDUE" } else { "upcoming" };
        lines.push(format!(
            "[{}] {} ({}): {}",
            status,
            r.name,
            r.trigger.label(),
            due.join("; ")
        ));
        lines.push(match &r.last {
            Some(last) => format!(
                "  last: {} on {} @ {} mi",
                last.task,
                show(last.date.map(dates::format_us)),
                show(last.miles)
            ),
            None => "  last: (none recorded)".to_string(),
        });
        lines.push(format!(
            "  interval: {} mi / {} mo",
            r.miles_interval, r.months_interval
        ));
        if !r.note.is_empty() {
            lines.push(format!("  note: {}", r.note));
        }
    }
    lines.join("\n")
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
