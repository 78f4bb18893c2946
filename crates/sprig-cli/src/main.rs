#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use sprig_core::db;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sprig: hierarchical to-do list",
    long_about = None
)]
struct Cli {
    /// Path to the item database (default: $SPRIG_DB or ./sprig.sqlite3).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// Resolve the database path: `--db`, then `SPRIG_DB`, then the
    /// default file in the working directory.
    fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(|| {
            env::var_os("SPRIG_DB")
                .map_or_else(|| PathBuf::from("sprig.sqlite3"), PathBuf::from)
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Create a new item",
        after_help = "EXAMPLES:\n    # Create a root item\n    sprig add \"Plan the trip\"\n\n    # Create a child of item 1\n    sprig add \"Book flights\" --parent 1\n\n    # Emit machine-readable output\n    sprig add \"Plan the trip\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        about = "List all items",
        after_help = "EXAMPLES:\n    sprig list\n    sprig list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Show one item",
        after_help = "EXAMPLES:\n    sprig show 3\n    sprig show 3 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Update an item's name, completion, or parent",
        after_help = "EXAMPLES:\n    # Mark item 3 complete\n    sprig edit 3 --complete true\n\n    # Rename and reparent in one go\n    sprig edit 3 --name \"Book hotel\" --parent 1"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        about = "Delete an item",
        after_help = "EXAMPLES:\n    sprig rm 3"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(
        about = "Show an item's parent or full ancestor chain",
        after_help = "EXAMPLES:\n    # Immediate parent only\n    sprig parents 3\n\n    # Whole chain up to the root\n    sprig parents 3 --all"
    )]
    Parents(cmd::parents::ParentsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPRIG_LOG")
        .unwrap_or_else(|_| EnvFilter::new("sprig=info,warn"));

    let format = env::var("SPRIG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.output_mode();
    let db_path = cli.db_path();
    tracing::debug!(path = %db_path.display(), "opening item store");
    let mut conn = db::open_store(&db_path)?;

    match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, &mut conn, output),
        Commands::List(args) => cmd::list::run_list(args, &conn, output),
        Commands::Show(args) => cmd::show::run_show(args, &conn, output),
        Commands::Edit(args) => cmd::edit::run_edit(args, &mut conn, output),
        Commands::Rm(args) => cmd::rm::run_rm(args, &mut conn, output),
        Commands::Parents(args) => cmd::parents::run_parents(args, &conn, output),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
