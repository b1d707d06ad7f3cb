//! CLI entry point for the AVL reportability tool.
//!
//! Provides subcommands for listing a workbook's sheets, reporting from a
//! workbook, reporting from manually entered figures, and writing a
//! manual-entry template.

use anyhow::{Context, Result};
use avl_reportability::analyzers::analyzer::analyze;
use avl_reportability::config::{InputSource, ManualEntries, ReportConfig, SectionMarkers};
use avl_reportability::output::{append_rows, print_pretty, write_json, write_text};
use avl_reportability::report::Report;
use avl_reportability::source::{SheetSource, WorkbookSource};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "avl_reportability")]
#[command(about = "Reportability analysis of AVL transmissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of a workbook
    Sheets {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Build the report from a workbook's summary tables
    Workbook {
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Sheet to read (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Marker row of the "AVL a HUB" table
        #[arg(long, default_value_t = 5)]
        avl_hub_row: usize,

        /// Marker row of the "HUB a SIMON" table
        #[arg(long, default_value_t = 18)]
        hub_simon_row: usize,

        /// Marker row of the "AVL a SIMON" table
        #[arg(long, default_value_t = 30)]
        avl_simon_row: usize,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Build the report from manually entered figures
    Manual {
        /// JSON file with the entries (defaults to the sample figures)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Write a manual-entry template prefilled with the sample figures
    Template {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Analysis date, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// CSV file to append the tidy rows to
    #[arg(long)]
    csv: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/avl_reportability.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("avl_reportability.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { path } => {
            let source = WorkbookSource::open(&path)
                .with_context(|| format!("cannot open workbook {}", path.display()))?;
            let names = source.sheet_names();
            info!(
                workbook = source.path(),
                sheets = names.len(),
                "Sheets listed"
            );
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Workbook {
            path,
            sheet,
            avl_hub_row,
            hub_simon_row,
            avl_simon_row,
            render,
        } => {
            let config = ReportConfig {
                analysis_date: render.date(),
                input: InputSource::Workbook {
                    path,
                    sheet,
                    markers: SectionMarkers {
                        avl_hub: avl_hub_row,
                        hub_simon: hub_simon_row,
                        avl_simon: avl_simon_row,
                    },
                },
            };
            render.emit(&analyze(&config)?)?;
        }
        Commands::Manual { input, render } => {
            let entries = match input {
                Some(path) => ManualEntries::load(&path)?,
                None => {
                    warn!("No input file given, using the sample figures");
                    ManualEntries::sample()
                }
            };
            let config = ReportConfig {
                analysis_date: render.date(),
                input: InputSource::Manual(entries),
            };
            render.emit(&analyze(&config)?)?;
        }
        Commands::Template { output } => {
            let json = ManualEntries::sample().to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json + "\n")
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    info!(path = %path.display(), "Template written");
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

/// Reads filter directives from `var`, falling back to `default` when unset
/// or unparsable.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}

impl RenderArgs {
    fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Writes the report to stdout and appends its rows to the CSV file, if
    /// one was given.
    fn emit(&self, report: &Report) -> Result<()> {
        print_pretty(report);

        let stdout = std::io::stdout().lock();
        match self.format {
            Format::Text => write_text(stdout, report)?,
            Format::Json => write_json(stdout, report)?,
        }

        if let Some(path) = &self.csv {
            append_rows(path, report).with_context(|| format!("cannot append to {}", path))?;
            info!(path, "CSV rows appended");
        }
        Ok(())
    }
}
