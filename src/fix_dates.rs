use anyhow::{Context, Result};

use crate::table::Table;
use crate::workspace::Workspace;
use crate::{dates, msg};

pub const DEFAULT_COLUMN: &str = "date";

/// Rewrite a CSV date column in place as `MM/DD/YYYY`.
///
/// Cells that do not follow the 7/8-digit rule are blanked. Already fixed
/// cells parse back to themselves, so running twice changes nothing.
pub fn run(workspace: &Workspace, column: &str) -> Result<()> {
    let path = workspace.csv_path();
    let mut table = Table::from_path(&path)?;

    let (fixed, cleared) = normalize_column(&mut table, column)?;
    table.write_to_path(&path)?;

    msg::success(&format!(
        "Dates fixed ({} rows) and saved back to {}",
        fixed,
        path.display()
    ));
    if cleared > 0 {
        msg::warn(&format!("{} unparseable dates were cleared", cleared));
    }
    Ok(())
}

/// Normalize one column; returns (rows with a date, rows cleared).
fn normalize_column(table: &mut Table, column: &str) -> Result<(usize, usize)> {
    let col = table
        .column(column)
        .with_context(|| format!("Column '{}' not found in CSV", column))?;

    let mut fixed = 0;
    let mut cleared = 0;
    for row in &mut table.rows {
        if row.len() <= col {
            row.resize(col + 1, String::new());
        }
        let cell = &mut row[col];
        match dates::parse_digit_date(cell) {
            Some(date) => {
                *cell = dates::format_us(date);
                fixed += 1;
            }
            None => {
                if !cell.is_empty() {
                    cleared += 1;
                }
                cell.clear();
            }
        }
    }
    Ok((fixed, cleared))
}

#[cfg(test)]
#[path = "fix_dates_test.rs"]
mod tests;
