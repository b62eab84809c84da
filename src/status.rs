use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::columns::ColumnMap;
use crate::config::MaintenanceConfig;
use crate::records::{MaintenanceData, ServiceRecord};
use crate::rules::{self, ScheduleRules};
use crate::schedule::{self, DueRow, Reference};
use crate::table::Table;
use crate::workspace::Workspace;
use crate::{dates, import, msg, report};

/// Print the due table for every configured task.
pub fn run(workspace: &Workspace, miles: Option<u64>, date: Option<String>) -> Result<()> {
    let rows = gather_rows(workspace, miles, date)?;
    println!("{}", report::render(&rows));
    Ok(())
}

/// Print only the tasks that are overdue or due soon.
pub fn due(workspace: &Workspace, miles: Option<u64>, date: Option<String>) -> Result<()> {
    let rows = attention_rows(gather_rows(workspace, miles, date)?);
    if rows.is_empty() {
        msg::success("Nothing due soon. You're all set.");
    } else {
        println!("Items due or due soon:");
        println!("{}", report::render(&rows));
    }
    Ok(())
}

/// Print rule-based reminders computed straight from `cardata.csv` and
/// `schedule_rules.yaml`.
///
/// Without `--miles`, the highest mileage in the CSV is the odometer.
pub fn remind(workspace: &Workspace, miles: Option<u64>, date: Option<String>) -> Result<()> {
    let rules = ScheduleRules::load(&workspace.rules_path())?;
    let services = csv_services(workspace)?;

    let miles = match miles.or_else(|| highest_miles(&services)) {
        Some(miles) => miles,
        None => bail!("Current mileage unknown\nPass --miles <N>"),
    };
    let today = parse_date_arg(date)?.unwrap_or_else(dates::today);

    let reminders = rules::reminders(&rules, &services, miles, today);
    println!(
        "{}",
        report::render_reminders(&rules.vehicle_name, miles, today, &reminders)
    );
    Ok(())
}

fn csv_services(workspace: &Workspace) -> Result<Vec<ServiceRecord>> {
    let path = workspace.csv_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let table = Table::from_path(&path)?;
    let columns = ColumnMap::detect(&table, ColumnMap::default());
    Ok(import::extract_services(&table, &columns))
}

fn highest_miles(services: &[ServiceRecord]) -> Option<u64> {
    services.iter().filter_map(|s| s.miles).max()
}

fn attention_rows(rows: Vec<DueRow>) -> Vec<DueRow> {
    rows.into_iter()
        .filter(|r| r.status.needs_attention())
        .collect()
}

fn gather_rows(workspace: &Workspace, miles: Option<u64>, date: Option<String>) -> Result<Vec<DueRow>> {
    let config_path = workspace.config_path();
    if !config_path.exists() {
        bail!(
            "No {} found\nRun `cardata import` to generate it from the CSV",
            config_path.display()
        );
    }
    let config = MaintenanceConfig::load(&config_path)?;
    let data = MaintenanceData::load(&workspace.data_path())?;

    let date = parse_date_arg(date)?;
    let at = Reference::resolve(&data, miles, date);
    Ok(schedule::build_rows(&config, &data, at))
}

pub(crate) fn parse_date_arg(date: Option<String>) -> Result<Option<NaiveDate>> {
    match date {
        Some(d) => dates::parse_iso(&d),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
