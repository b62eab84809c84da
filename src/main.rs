mod columns;
mod config;
mod dates;
mod fix_dates;
mod git_commands;
mod import;
mod intervals;
mod log;
mod msg;
mod records;
mod report;
mod rules;
mod schedule;
mod status;
mod table;
mod workspace;

#[cfg(test)]
mod test_helpers;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::control;

use crate::columns::ColumnMap;
use crate::import::ImportOptions;
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(
    name = "cardata",
    about = "Turn vehicle maintenance CSV records into JSON/YAML and track what is due"
)]
struct Cli {
    /// Data directory holding cardata.csv (defaults to $CARDATA_DIR, then the executable's directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate maintenance_data.json and maintenance_config.yaml from cardata.csv
    Import(ImportArgs),
    /// Show when every task is next due
    Status {
        /// Current odometer miles (defaults to the latest reading)
        #[arg(long)]
        miles: Option<u64>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show only tasks that are overdue or due soon
    Due {
        /// Current odometer miles (defaults to the latest reading)
        #[arg(long)]
        miles: Option<u64>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show rule-based reminders from cardata.csv and schedule_rules.yaml
    Remind {
        /// Current odometer miles (defaults to the highest mileage in the CSV)
        #[arg(long)]
        miles: Option<u64>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Append a maintenance record to cardata.csv
    AddRecord {
        /// Service date, MM/DD/YYYY (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        miles: f64,
        /// What was done
        #[arg(long)]
        service: String,
    },
    /// Record an odometer reading
    AddOdo {
        #[arg(long)]
        miles: u64,
        /// Reading date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Record a performed service
    LogService {
        /// Task name (if not provided, will prompt interactively)
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        miles: u64,
        /// Service date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Rewrite the CSV date column as MM/DD/YYYY
    FixDates {
        /// Name of the date column
        #[arg(long, default_value = fix_dates::DEFAULT_COLUMN)]
        column: String,
    },
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// CSV column holding 7/8-digit date tokens
    #[arg(long)]
    datecol: Option<String>,
    /// CSV column holding odometer miles
    #[arg(long)]
    milescol: Option<String>,
    /// CSV column holding the service description
    #[arg(long)]
    taskcol: Option<String>,
    /// CSV column holding notes, comments or vendor
    #[arg(long)]
    notescol: Option<String>,
    /// Parse and print a summary without writing files
    #[arg(long)]
    dry_run: bool,
    /// Git add/commit the updated files
    #[arg(long)]
    commit: bool,
    /// Also git push after committing
    #[arg(long, requires = "commit")]
    push: bool,
    /// Commit message
    #[arg(short, long, default_value = import::DEFAULT_MESSAGE)]
    message: String,
}

impl From<ImportArgs> for ImportOptions {
    fn from(args: ImportArgs) -> Self {
        ImportOptions {
            columns: ColumnMap {
                date: args.datecol,
                miles: args.milescol,
                task: args.taskcol,
                notes: args.notescol,
            },
            dry_run: args.dry_run,
            commit: args.commit,
            push: args.push,
            message: args.message,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color
        || std::env::var_os("NO_COLOR").is_some()
        || std::env::var_os("TERM").is_some_and(|v| v == "dumb")
        || !std::io::stdout().is_terminal()
    {
        control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let workspace = Workspace::resolve(cli.dir)?;

    match cli.command {
        None => import::run(&workspace, ImportOptions::default()),
        Some(Command::Import(args)) => import::run(&workspace, args.into()),
        Some(Command::Status { miles, date }) => status::run(&workspace, miles, date),
        Some(Command::Due { miles, date }) => status::due(&workspace, miles, date),
        Some(Command::Remind { miles, date }) => status::remind(&workspace, miles, date),
        Some(Command::AddRecord {
            date,
            miles,
            service,
        }) => log::add_record(&workspace, date, miles, &service),
        Some(Command::AddOdo { miles, date }) => log::add_odo(&workspace, miles, date),
        Some(Command::LogService {
            task,
            miles,
            date,
            notes,
        }) => log::log_service(&workspace, task, miles, date, notes),
        Some(Command::FixDates { column }) => fix_dates::run(&workspace, &column),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
