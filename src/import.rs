use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use git2::{Repository, Status};

use crate::columns::ColumnMap;
use crate::config::{MaintenanceConfig, TaskConfig};
use crate::git_commands::{self, git_commit, git_push};
use crate::records::{MaintenanceData, OdometerReading, ServiceRecord};
use crate::table::Table;
use crate::workspace::Workspace;
use crate::{dates, intervals, msg};

pub const DEFAULT_MESSAGE: &str = "Update maintenance data from CSV";

/// What the `import` command should do besides converting.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub columns: ColumnMap,
    pub dry_run: bool,
    pub commit: bool,
    pub push: bool,
    pub message: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            columns: ColumnMap::default(),
            dry_run: false,
            commit: false,
            push: false,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Result of converting the CSV, before anything is written.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub columns: ColumnMap,
    pub data: MaintenanceData,
    pub config: MaintenanceConfig,
}

/// Regenerate `maintenance_data.json` and `maintenance_config.yaml` from
/// `cardata.csv`, then optionally commit and push them.
pub fn run(workspace: &Workspace, options: ImportOptions) -> Result<()> {
    let table = Table::from_path(&workspace.csv_path())?;
    let existing = MaintenanceConfig::load_existing(&workspace.config_path());
    let conversion = convert(&table, options.columns.clone(), existing, dates::today());

    print_summary(&conversion);

    let files = output_names(workspace)?;
    let files: Vec<&str> = files.iter().map(String::as_str).collect();

    if options.dry_run {
        println!();
        println!("--dry-run: nothing written.");
        if options.commit {
            println!("Would run:");
            println!("  {}", git_commands::display_command(&git_commit::stage_args(&files)));
            println!(
                "  {}",
                git_commands::display_command(&git_commit::commit_args(&options.message, &files))
            );
            if options.push {
                println!("  {}", git_commands::display_command(git_push::PUSH_ARGS));
            }
        }
        return Ok(());
    }

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    for backup in backup_outputs(workspace, &stamp)? {
        println!("Backed up to {}", backup.display());
    }

    conversion.data.save(&workspace.data_path())?;
    conversion.config.save(&workspace.config_path())?;
    msg::success(&format!("Wrote: {}", files.join(", ")));

    if options.commit {
        commit_outputs(workspace, &files, &options.message, options.push)?;
    }

    Ok(())
}

/// Turn the raw table into normalized records and a task config.
///
/// Vehicle and thresholds are carried over from `existing` when present.
pub fn convert(
    table: &Table,
    overrides: ColumnMap,
    existing: Option<MaintenanceConfig>,
    today: NaiveDate,
) -> Conversion {
    let columns = ColumnMap::detect(table, overrides);
    let services = extract_services(table, &columns);
    let odometer = odometer_points(&services);
    let tasks = task_configs(&services, today);

    let existing = existing.unwrap_or_default();
    let config = MaintenanceConfig {
        vehicle: existing.vehicle,
        thresholds: existing.thresholds,
        tasks,
    };

    Conversion {
        columns,
        data: MaintenanceData { odometer, services },
        config,
    }
}

/// Extract one service per meaningful row, de-duplicated and sorted by
/// task, date and miles.
pub fn extract_services(table: &Table, columns: &ColumnMap) -> Vec<ServiceRecord> {
    let index = |name: &Option<String>| name.as_deref().and_then(|n| table.column(n));
    let date_col = index(&columns.date);
    let miles_col = index(&columns.miles);
    let task_col = index(&columns.task);
    let notes_col = index(&columns.notes);

    let cell = |row: usize, col: Option<usize>| col.map(|c| table.cell(row, c)).unwrap_or("");

    let mut seen = HashSet::new();
    let mut services = Vec::new();
    for row in 0..table.len() {
        let record = ServiceRecord {
            task: collapse_whitespace(cell(row, task_col)),
            miles: parse_miles(cell(row, miles_col)),
            date: dates::parse_digit_date(cell(row, date_col)),
            notes: cell(row, notes_col).trim().to_string(),
        };

        let meaningful = !record.task.is_empty() || record.miles.is_some() || record.date.is_some();
        if meaningful && seen.insert(record.clone()) {
            services.push(record);
        }
    }

    services.sort_by(|a, b| a.cmp_by_task(b));
    services
}

/// Distinct (date, miles) pairs from services that have both.
pub fn odometer_points(services: &[ServiceRecord]) -> Vec<OdometerReading> {
    let mut points: Vec<OdometerReading> = services
        .iter()
        .filter_map(|s| Some(OdometerReading { date: s.date?, miles: s.miles? }))
        .collect();
    points.sort();
    points.dedup();
    points
}

/// One task config per distinct task name, anchored at its latest dated
/// service.
pub fn task_configs(services: &[ServiceRecord], today: NaiveDate) -> Vec<TaskConfig> {
    let mut names: Vec<&str> = services
        .iter()
        .map(|s| s.task.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .map(|name| {
            let last = services
                .iter()
                .filter(|s| s.task == name && s.date.is_some())
                .max_by_key(|s| s.recency());
            let (interval_miles, interval_months) = intervals::guess(name);

            TaskConfig {
                name: name.to_string(),
                interval_miles,
                interval_months,
                initial_miles: last.and_then(|s| s.miles).unwrap_or(0),
                initial_date: Some(last.and_then(|s| s.date).unwrap_or(today)),
            }
        })
        .collect()
}

/// Odometer cell to whole miles: strip everything but digits and `.`,
/// then truncate.
fn parse_miles(value: &str) -> Option<u64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let miles: f64 = cleaned.parse().ok()?;
    miles.is_finite().then_some(miles.trunc() as u64)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn print_summary(conversion: &Conversion) {
    let show = |c: &Option<String>| c.clone().unwrap_or_else(|| "(none)".to_string());
    println!("Detected columns:");
    println!("  date:  {}", show(&conversion.columns.date));
    println!("  miles: {}", show(&conversion.columns.miles));
    println!("  task:  {}", show(&conversion.columns.task));
    println!("  notes: {}", show(&conversion.columns.notes));
    println!(
        "Parsed rows: {}  | Odometer points: {}",
        conversion.data.services.len(),
        conversion.data.odometer.len()
    );
}

/// File names of the generated outputs, relative to the workspace root.
fn output_names(workspace: &Workspace) -> Result<Vec<String>> {
    [workspace.data_path(), workspace.config_path()]
        .iter()
        .map(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .with_context(|| format!("Invalid output path: {}", p.display()))
        })
        .collect()
}

/// Copy existing outputs to `<stem>.bak_<stamp>.<ext>` next to them.
///
/// Never overwrites an earlier backup: a taken name gets a `_1`, `_2`, ...
/// suffix after the stamp.
fn backup_outputs(workspace: &Workspace, stamp: &str) -> Result<Vec<PathBuf>> {
    let mut backups = Vec::new();
    for path in [workspace.data_path(), workspace.config_path()] {
        if !path.exists() {
            continue;
        }
        let backup = backup_path(&path, stamp);
        std::fs::copy(&path, &backup).with_context(|| {
            format!("Failed to back up {} to {}", path.display(), backup.display())
        })?;
        backups.push(backup);
    }
    Ok(backups)
}

fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("backup");
    let ext = path.extension().and_then(|e| e.to_str());
    let named = |tag: &str| match ext {
        Some(ext) => path.with_file_name(format!("{}.bak_{}.{}", stem, tag, ext)),
        None => path.with_file_name(format!("{}.bak_{}", stem, tag)),
    };

    let mut candidate = named(stamp);
    let mut n = 1;
    while candidate.exists() {
        candidate = named(&format!("{}_{}", stamp, n));
        n += 1;
    }
    candidate
}

/// Stage and commit the outputs, then optionally push.
///
/// Skips the commit when neither file differs from the index or HEAD.
fn commit_outputs(workspace: &Workspace, files: &[&str], message: &str, push: bool) -> Result<()> {
    git_commands::check_git_version()?;

    let root = workspace.root();
    if !has_changes(root, files)? {
        msg::warn("Nothing to commit: outputs unchanged");
        return Ok(());
    }

    git_commit::stage_files(root, files)?;
    git_commit::commit(root, message, files)?;
    msg::success("Git commit created");

    if push {
        git_push::push(root)?;
        msg::success("Git push complete");
    }

    Ok(())
}

/// Whether any of `files` (relative to `root`) is new or modified.
fn has_changes(root: &Path, files: &[&str]) -> Result<bool> {
    let repo = Repository::discover(root)
        .with_context(|| format!("{} is not inside a git repository", root.display()))?;
    let workdir = repo
        .workdir()
        .context("Cannot commit in bare repository")?
        .canonicalize()?;
    let root = root.canonicalize()?;
    let prefix = match root.strip_prefix(&workdir) {
        Ok(prefix) => prefix.to_path_buf(),
        Err(_) => bail!(
            "{} is outside the repository at {}",
            root.display(),
            workdir.display()
        ),
    };

    for file in files {
        let status = repo.status_file(&prefix.join(file))?;
        if status != Status::CURRENT && !status.contains(Status::IGNORED) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
