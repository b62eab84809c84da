use crate::dates;
use crate::table::Table;

/// Number of leading rows sampled when scoring date columns.
const DATE_SAMPLE_ROWS: usize = 100;

const MILES_WORDS: &[&str] = &["odo", "odometer", "mileage", "miles", "mi"];
const TASK_WORDS: &[&str] = &[
    "service",
    "task",
    "work",
    "description",
    "item",
    "maintenance",
    "operation",
];
const NOTES_WORDS: &[&str] = &["note", "comment", "remark", "details", "vendor", "shop"];

/// Which CSV column feeds which record field. `None` means the field is
/// absent from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<String>,
    pub miles: Option<String>,
    pub task: Option<String>,
    pub notes: Option<String>,
}

impl ColumnMap {
    /// Fill every column the caller did not name by inspecting the table.
    pub fn detect(table: &Table, overrides: ColumnMap) -> Self {
        let date = overrides.date.or_else(|| detect_date_column(table));

        let candidates: Vec<&str> = table
            .headers
            .iter()
            .map(String::as_str)
            .filter(|h| Some(*h) != date.as_deref())
            .collect();

        let miles = overrides
            .miles
            .or_else(|| pick(&candidates, MILES_WORDS));
        let task = overrides.task.or_else(|| pick(&candidates, TASK_WORDS));
        let notes = overrides
            .notes
            .or_else(|| pick(&candidates, NOTES_WORDS));

        ColumnMap {
            date,
            miles,
            task,
            notes,
        }
    }
}

/// The column whose first rows contain the most parseable date tokens.
/// Ties go to the leftmost column.
pub fn detect_date_column(table: &Table) -> Option<String> {
    let mut best: Option<(usize, usize)> = None;
    for col in 0..table.headers.len() {
        let hits = (0..table.len().min(DATE_SAMPLE_ROWS))
            .filter(|&row| dates::parse_digit_date(table.cell(row, col)).is_some())
            .count();
        if best.is_none_or(|(_, score)| hits > score) {
            best = Some((col, hits));
        }
    }
    best.map(|(col, _)| table.headers[col].clone())
}

/// First header containing any of `words` as a whole word.
fn pick(headers: &[&str], words: &[&str]) -> Option<String> {
    headers
        .iter()
        .find(|h| header_words(h).any(|w| words.contains(&w.as_str())))
        .map(|h| h.to_string())
}

/// Lower-cased words of a header. Letters, digits and `_` are word
/// characters; everything else separates.
fn header_words(header: &str) -> impl Iterator<Item = String> + '_ {
    header
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
#[path = "columns_test.rs"]
mod tests;
