//! gridview - Terminal data grid for model comparison and a user directory.
//!
//! Supports two modes:
//! - Interactive (default): full-screen TUI with a models tab and a users tab
//! - Dump: print one page of a grid as JSON and exit
//!
//! Usage:
//!   gridview                                  # built-in models, 5 s mock load
//!   gridview --data models.json --load-delay 0
//!   gridview --dump --sort max_mode:desc --filter name=claude
//!   gridview --dump --table users --page-size 5 --page 2
//!   gridview --log-file gridview.log -v       # debug logs to a file

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use gridview::config::{DEFAULT_PAGE_SIZE, GridConfig};
use gridview::directory::UserDirectory;
use gridview::grid::Grid;
use gridview::models::{ModelRecord, load_models};
use gridview::table::TableRow;
use gridview::tui::{App, AppState};
use gridview::util::{QueryParseError, parse_filter_spec, parse_sort_spec};
use gridview::view::dump::dump_projection;

/// Grid printed by `--dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpTable {
    Models,
    Users,
}

/// Terminal data grid.
#[derive(Parser)]
#[command(name = "gridview", about = "Terminal data grid", version)]
struct Args {
    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Seconds the model grid stays in its loading state.
    #[arg(long, default_value = "5", value_name = "SECONDS")]
    load_delay: u64,

    /// UI tick interval in milliseconds.
    #[arg(long, default_value = "250", value_name = "MS")]
    tick: u64,

    /// JSON file with model records (array of objects with name,
    /// defaultContext, maxMode, recommendation). An empty array falls back
    /// to the built-in models.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Print one page as JSON instead of starting the TUI.
    #[arg(long)]
    dump: bool,

    /// Grid to dump.
    #[arg(long, value_enum, default_value_t = DumpTable::Models, requires = "dump")]
    table: DumpTable,

    /// Page to dump (1-based).
    #[arg(long, default_value = "1", requires = "dump")]
    page: usize,

    /// Sort for the dump: COLUMN[:asc|desc]. Columns by name or index.
    #[arg(long, value_name = "SPEC", requires = "dump")]
    sort: Option<String>,

    /// Filter for the dump: COLUMN=TEXT. May be repeated.
    #[arg(long, value_name = "SPEC", requires = "dump")]
    filter: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. The TUI logs nowhere without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GridConfig {
        GridConfig {
            page_size: self.page_size,
            load_delay: Duration::from_secs(self.load_delay),
            tick_rate: Duration::from_millis(self.tick.max(1)),
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref(), args.dump) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let models = match &args.data {
        Some(path) => match load_models(path) {
            Ok(models) => models,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    let config = args.config();

    if args.dump {
        match dump(&args, models, config.page_size) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let state = AppState::new(
        Grid::loading(models, config.page_size),
        UserDirectory::with_defaults(config.page_size),
    );
    if let Err(e) = App::new(state, config).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Applies `--sort`, `--filter` and `--page` to a ready grid.
fn apply_query<T: TableRow>(grid: &mut Grid<T>, args: &Args) -> Result<(), QueryParseError> {
    if let Some(spec) = &args.sort {
        grid.set_sort(parse_sort_spec::<T>(spec)?);
    }
    for spec in &args.filter {
        let (column, text) = parse_filter_spec::<T>(spec)?;
        grid.set_filter(column, &text);
    }
    grid.set_page(args.page.saturating_sub(1));
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Builds the requested grid without the load delay and serializes one page.
fn dump(
    args: &Args,
    models: Vec<ModelRecord>,
    page_size: usize,
) -> Result<String, Box<dyn std::error::Error>> {
    match args.table {
        DumpTable::Models => {
            let mut grid = Grid::loading(models, page_size);
            grid.finish_loading();
            apply_query(&mut grid, args)?;
            to_json(&dump_projection(&grid))
        }
        DumpTable::Users => {
            let mut directory = UserDirectory::with_defaults(page_size);
            apply_query(directory.grid_mut(), args)?;
            to_json(&dump_projection(directory.grid()))
        }
    }
}

/// Initializes tracing. The TUI owns the terminal, so logs go to `log_file`
/// when given; dump mode falls back to stderr.
fn init_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    stderr_fallback: bool,
) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());

    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if stderr_fallback {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
