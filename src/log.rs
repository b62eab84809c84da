use std::io::IsTerminal;

use anyhow::{Context, Result, bail};

use crate::columns::ColumnMap;
use crate::config::MaintenanceConfig;
use crate::records::{MaintenanceData, OdometerReading, ServiceRecord};
use crate::status::parse_date_arg;
use crate::table::Table;
use crate::workspace::Workspace;
use crate::{dates, msg};

/// Append an odometer reading to the data file.
pub fn add_odo(workspace: &Workspace, miles: u64, date: Option<String>) -> Result<()> {
    let date = parse_date_arg(date)?.unwrap_or_else(dates::today);
    append_odometer(workspace, OdometerReading { date, miles })?;
    msg::success(&format!("Odometer added: {} on {}", miles, date));
    Ok(())
}

/// Append a performed service to the data file.
///
/// Without a task name, offers the configured tasks in a picker.
pub fn log_service(
    workspace: &Workspace,
    task: Option<String>,
    miles: u64,
    date: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let task = match task {
        Some(t) => t.trim().to_string(),
        None => pick_task(workspace)?,
    };
    if task.is_empty() {
        bail!("Task name cannot be empty");
    }

    let date = parse_date_arg(date)?.unwrap_or_else(dates::today);
    append_service(
        workspace,
        ServiceRecord {
            task: task.clone(),
            miles: Some(miles),
            date: Some(date),
            notes: notes.unwrap_or_default(),
        },
    )?;
    msg::success(&format!("Logged service: {} at {} on {}", task, miles, date));
    Ok(())
}

/// Header written when `add-record` creates `cardata.csv`.
pub const RECORD_HEADERS: [&str; 3] = ["date", "mileage", "service"];

/// Append a `date, mileage, service` row to `cardata.csv`, creating the
/// file if needed.
///
/// The date is `MM/DD/YYYY` and defaults to today.
pub fn add_record(workspace: &Workspace, date: Option<String>, miles: f64, service: &str) -> Result<()> {
    let service = service.trim();
    if service.is_empty() {
        bail!("Service cannot be empty");
    }
    let date = match date {
        Some(d) => dates::parse_us(&d)?,
        None => dates::today(),
    };
    if !miles.is_finite() || miles < 0.0 {
        bail!("Mileage must be a non-negative number, got {}", miles);
    }

    let path = workspace.csv_path();
    let mut table = if path.exists() {
        Table::from_path(&path)?
    } else {
        Table {
            headers: RECORD_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    };

    let (date_col, miles_col, service_col) = record_columns(&table).with_context(|| {
        format!(
            "{} must have date, mileage and service columns",
            path.display()
        )
    })?;

    let mut row = vec![String::new(); table.headers.len()];
    row[date_col] = dates::format_us(date);
    row[miles_col] = miles.to_string();
    row[service_col] = service.to_string();
    table.rows.push(row);
    table.write_to_path(&path)?;

    msg::success(&format!(
        "Saved: {} | {} mi | {}",
        dates::format_us(date),
        miles,
        service
    ));
    Ok(())
}

/// Column indices for a new record. A header named `date` wins over
/// content-based date detection, which has nothing to score in a fresh file.
fn record_columns(table: &Table) -> Option<(usize, usize, usize)> {
    let named_date = table
        .headers
        .iter()
        .find(|h| h.eq_ignore_ascii_case("date"))
        .cloned();
    let columns = ColumnMap::detect(
        table,
        ColumnMap {
            date: named_date,
            ..ColumnMap::default()
        },
    );
    let index = |name: Option<String>| table.column(name?.as_str());
    Some((
        index(columns.date)?,
        index(columns.miles)?,
        index(columns.task)?,
    ))
}

fn append_odometer(workspace: &Workspace, reading: OdometerReading) -> Result<()> {
    let path = workspace.data_path();
    let mut data = MaintenanceData::load(&path)?;
    data.odometer.push(reading);
    data.save(&path)
}

fn append_service(workspace: &Workspace, record: ServiceRecord) -> Result<()> {
    let path = workspace.data_path();
    let mut data = MaintenanceData::load(&path)?;
    data.services.push(record);
    data.save(&path)
}

/// Interactive task picker over the configured task names.
fn pick_task(workspace: &Workspace) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        bail!("No task given\nPass --task <name> when not running interactively");
    }

    let names = configured_tasks(workspace)?;
    if names.is_empty() {
        bail!("No tasks configured\nPass --task <name> or run `cardata import` first");
    }

    inquire::Select::new("Which service was performed?", names)
        .prompt()
        .context("Task selection cancelled")
}

fn configured_tasks(workspace: &Workspace) -> Result<Vec<String>> {
    let path = workspace.config_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let config = MaintenanceConfig::load(&path)?;
    Ok(config.tasks.into_iter().map(|t| t.name).collect())
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
