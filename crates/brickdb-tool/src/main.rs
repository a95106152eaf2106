//! brickdb - build and inspect LEGO colors/parts databases.
//!
//! - `brickdb build --database <path> --colors <page.json> --parts <page.json>`:
//!   create a new database and fill it from saved catalog pages
//! - `brickdb show --database <path> [--colors] [--parts]`: print the
//!   stored records as JSON

use brickdb::prelude::*;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "brickdb")]
#[command(author, version, about = "Build and inspect LEGO colors/parts databases", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new database from saved catalog pages
    Build {
        /// Database file to create; must not exist yet
        #[arg(long)]
        database: PathBuf,

        /// JSON page of colors, may be repeated
        #[arg(long = "colors", value_name = "PAGE")]
        colors: Vec<PathBuf>,

        /// JSON page of parts, may be repeated
        #[arg(long = "parts", value_name = "PAGE")]
        parts: Vec<PathBuf>,
    },

    /// Print the records stored in a database
    Show {
        /// Database file to read
        #[arg(long)]
        database: PathBuf,

        /// Print colors (default: both tables)
        #[arg(long)]
        colors: bool,

        /// Print parts (default: both tables)
        #[arg(long)]
        parts: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "brickdb failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            database,
            colors,
            parts,
        } => build(&database, &colors, &parts),
        Commands::Show {
            database,
            colors,
            parts,
        } => {
            // Neither flag means both tables.
            let both = !colors && !parts;
            show(&database, colors || both, parts || both)
        }
    }
}

/// Pages are decoded here while the writer thread inserts earlier ones.
fn build(database: &Path, colors: &[PathBuf], parts: &[PathBuf]) -> Result<()> {
    tracing::info!(database = %database.display(), sqlite = brickdb::sqlite_version(), "Building database");
    let mut writer = DatabaseWriter::spawn(database)?;

    for page in colors {
        let list = ResultsList::<Color>::from_file(page)?;
        tracing::debug!(page = %page.display(), count = list.results.len(), "Loaded colors page");
        writer.submit(WriteBatch::Colors(list.results))?;
    }
    for page in parts {
        let list = ResultsList::<Part>::from_file(page)?;
        tracing::debug!(page = %page.display(), count = list.results.len(), "Loaded parts page");
        writer.submit(WriteBatch::Parts(list.results))?;
    }

    let summary = writer.finish()?;
    tracing::info!(
        colors = summary.colors,
        parts = summary.parts,
        "Database built"
    );
    Ok(())
}

fn show(database: &Path, colors: bool, parts: bool) -> Result<()> {
    let reader = DatabaseReader::open(database)?;
    let mut output = serde_json::Map::new();

    if colors {
        let value = serde_json::to_value(reader.read_all_colors()?)
            .map_err(|e| Error::Serde(e.to_string()))?;
        output.insert("colors".to_string(), value);
    }
    if parts {
        let value = serde_json::to_value(reader.read_all_parts()?)
            .map_err(|e| Error::Serde(e.to_string()))?;
        output.insert("parts".to_string(), value);
    }
    reader.close();

    let text = serde_json::to_string_pretty(&output).map_err(|e| Error::Serde(e.to_string()))?;
    println!("{text}");
    Ok(())
}
