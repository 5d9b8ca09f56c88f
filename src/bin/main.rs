//! Appointment Sheet CLI
//!
//! Usage:
//!   appointment-sheet run [--from-date <date>] [--to-date <date>] [--output json]
//!   appointment-sheet sql [--dialect postgres]
//!   appointment-sheet init-db --db <path>
//!   appointment-sheet columns
//!
//! Examples:
//!   appointment-sheet run --from-date 2024-01-01 --to-date 2024-01-31 --appointment-type Demo
//!   appointment-sheet run --filters '{"sales_person": "North"}' --output json
//!   appointment-sheet sql --sales-person North --dialect postgres

use appointment_sheet::config::Settings;
use appointment_sheet::model::{ColumnDef, Filters, ReportOutput};
use appointment_sheet::reminder::ScheduledReminders;
use appointment_sheet::report::{appointment_query, columns, AppointmentSheet, ReportResult};
use appointment_sheet::sql::Dialect;
use appointment_sheet::store::SqliteStore;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appointment-sheet")]
#[command(about = "Appointment Sheet - scheduled appointments with project and reminder state")]
#[command(version)]
struct Cli {
    /// Config file (defaults to APPOINTMENT_SHEET_CONFIG, ./appointment-sheet.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the report
    Run {
        #[command(flatten)]
        filters: FilterArgs,

        /// SQLite database (overrides the configured path)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the appointment query for the given filters
    Sql {
        #[command(flatten)]
        filters: FilterArgs,

        /// SQLite database, only opened to resolve the sales person filter
        #[arg(long)]
        db: Option<PathBuf>,

        /// SQL dialect to print (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },

    /// Create the report tables in a database
    InitDb {
        /// SQLite database (overrides the configured path)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Print the column layout
    Columns {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Filters as a JSON object; individual flags override its keys
    #[arg(long)]
    filters: Option<String>,

    #[arg(long)]
    company: Option<String>,

    /// First scheduled date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    from_date: Option<NaiveDate>,

    /// Last scheduled date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to_date: Option<NaiveDate>,

    #[arg(long)]
    appointment_type: Option<String>,

    /// Include this sales person and everyone below them
    #[arg(long)]
    sales_person: Option<String>,
}

impl FilterArgs {
    fn to_filters(&self) -> ReportResult<Filters> {
        let mut filters = match &self.filters {
            Some(json) => Filters::from_json(json)?,
            None => Filters::default(),
        };
        if let Some(company) = &self.company {
            filters = filters.with_company(company);
        }
        if let Some(date) = self.from_date {
            filters = filters.with_from_date(date);
        }
        if let Some(date) = self.to_date {
            filters = filters.with_to_date(date);
        }
        if let Some(appointment_type) = &self.appointment_type {
            filters = filters.with_appointment_type(appointment_type);
        }
        if let Some(sales_person) = &self.sales_person {
            filters = filters.with_sales_person(sales_person);
        }
        Ok(filters)
    }
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Sqlite,
    Postgres,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Postgres => Dialect::Postgres,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain-text table
    Table,
    /// JSON object with columns and rows
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.logging.filter);

    let result = match cli.command {
        Commands::Run {
            filters,
            db,
            output,
        } => cmd_run(&settings, &filters, db, output),
        Commands::Sql {
            filters,
            db,
            dialect,
        } => cmd_sql(&settings, &filters, db, dialect),
        Commands::InitDb { db } => cmd_init_db(&settings, db),
        Commands::Columns { output } => cmd_columns(output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn db_path(settings: &Settings, db: Option<PathBuf>) -> ReportResult<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => Ok(settings.database.resolved_path()?),
    }
}

/// Open a database that `init-db` has already created.
fn open_store(settings: &Settings, db: Option<PathBuf>) -> ReportResult<SqliteStore> {
    Ok(SqliteStore::open_existing(db_path(settings, db)?)?)
}

fn cmd_run(
    settings: &Settings,
    filters: &FilterArgs,
    db: Option<PathBuf>,
    output: OutputFormat,
) -> ReportResult<()> {
    let filters = filters.to_filters()?;
    let store = open_store(settings, db)?;
    let reminders = ScheduledReminders::from_settings(&store, &settings.reminders)?;

    let report = AppointmentSheet::new(&store, reminders).run(&filters)?;

    match output {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_sql(
    settings: &Settings,
    filters: &FilterArgs,
    db: Option<PathBuf>,
    dialect: Option<DialectArg>,
) -> ReportResult<()> {
    let dialect = match dialect {
        Some(d) => d.into(),
        None => settings.database.dialect()?,
    };
    let filters = filters.to_filters()?;
    let (query, params) =
        appointment_query(&filters, Local::now().date_naive(), || open_store(settings, db))?;

    println!("{}", query.to_sql(dialect));
    println!();
    for (name, value) in params.iter() {
        println!("-- {} = {:?}", name, value);
    }
    Ok(())
}

fn cmd_init_db(settings: &Settings, db: Option<PathBuf>) -> ReportResult<()> {
    let store = SqliteStore::open(db_path(settings, db)?)?;
    store.init_schema()?;
    println!("OK: schema created");
    Ok(())
}

fn cmd_columns(output: OutputFormat) -> ReportResult<()> {
    let columns = columns();
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&columns)?),
        OutputFormat::Table => {
            for column in &columns {
                println!(
                    "{:<20} {:<28} {:<14} {:<16} {:>4}{}",
                    column.label,
                    column.fieldname,
                    column.fieldtype.as_str(),
                    column.options.unwrap_or("-"),
                    column.width,
                    if column.editable { "  editable" } else { "" }
                );
            }
        }
    }
    Ok(())
}

fn print_table(report: &ReportOutput) {
    let columns: &[ColumnDef] = &report.columns;
    let cells: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.display_value(c.fieldname).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(columns.iter().map(|c| c.label).collect()));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &cells {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
    println!();
    println!("{} appointment(s)", report.rows.len());
}
