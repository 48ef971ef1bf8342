//! # SDS Assistant CLI (`sds`)
//!
//! The `sds` binary is the primary interface for SDS Assistant. It provides
//! commands for database initialization, document ingestion, question
//! answering, browsing, and starting the JSON HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! sds --config ./config/sds.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sds init` | Create the SQLite database and run schema migrations |
//! | `sds ingest <path>` | Ingest an SDS file, or every matching file in a directory |
//! | `sds ask "<question>"` | Answer a question against the document store |
//! | `sds get <id>` | Print a full document and its hazard record |
//! | `sds list` | List recently ingested documents |
//! | `sds location add/list` | Manage locations |
//! | `sds history` | Show recent question-answer history |
//! | `sds stats` | Database statistics |
//! | `sds serve` | Start the JSON HTTP server |
//! | `sds completions <shell>` | Generate shell completions |

mod answer;
mod ask;
mod classify;
mod config;
mod db;
mod decode;
mod fields;
mod get;
mod history;
mod ingest;
mod locations;
mod migrate;
mod models;
mod passage;
mod retrieve;
mod sections;
mod server;
mod stats;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// SDS Assistant CLI — safety data sheet ingestion and question answering
/// over a local SQLite store.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file.
#[derive(Parser)]
#[command(
    name = "sds",
    about = "SDS Assistant — safety data sheet ingestion and question answering",
    version,
    long_about = "SDS Assistant ingests safety data sheets (PDF, DOCX, plain text), extracts \
    structured hazard records with pattern matching, and answers natural-language questions \
    about chemical hazards via a CLI and a JSON HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/sds.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all required tables (locations,
    /// documents, hazard_records, qa_history). Idempotent — running it
    /// multiple times is safe.
    Init,

    /// Ingest an SDS file, or every matching file under a directory.
    ///
    /// Decodes each file to text, extracts structured fields and hazard
    /// sections, and stores the document plus its hazard record.
    /// Re-ingesting byte-identical content is rejected as a duplicate.
    Ingest {
        /// File or directory to ingest.
        path: PathBuf,

        /// Assign ingested documents to this location id.
        #[arg(long)]
        location: Option<i64>,

        /// Show which files would be ingested without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Answer a question against the document store.
    ///
    /// Retrieves candidate documents, selects the most relevant passages,
    /// and prints a ranked answer with confidence and sources.
    Ask {
        /// The question to answer.
        question: String,

        /// Restrict retrieval to documents at this location id.
        #[arg(long)]
        location: Option<i64>,

        /// Session identifier recorded in the QA history log.
        #[arg(long)]
        session: Option<String>,
    },

    /// Print a full document and its hazard record by id.
    Get {
        /// Document id.
        id: String,
    },

    /// List recently ingested documents.
    List {
        /// Restrict to documents at this location id.
        #[arg(long)]
        location: Option<i64>,

        /// Maximum number of documents to show.
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Manage locations (department/city/state/country tuples).
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Show recent question-answer history.
    History {
        /// Maximum number of entries to show.
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Database statistics.
    Stats,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// ingestion and question-answering API.
    Serve,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Location management subcommands.
#[derive(Subcommand)]
enum LocationAction {
    /// Add a location. Adding an existing tuple returns its existing id.
    Add {
        department: String,
        city: String,
        state: String,
        #[arg(long, default_value = "United States")]
        country: String,
    },
    /// List all locations.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Completions never need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "sds", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Ingest {
            path,
            location,
            dry_run,
        } => {
            ingest::run_ingest(&cfg, &path, location, dry_run).await?;
        }
        Commands::Ask {
            question,
            location,
            session,
        } => {
            ask::run_ask(&cfg, &question, location, session).await?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, &id).await?;
        }
        Commands::List { location, limit } => {
            get::run_list(&cfg, location, limit).await?;
        }
        Commands::Location { action } => match action {
            LocationAction::Add {
                department,
                city,
                state,
                country,
            } => {
                locations::run_add(&cfg, &department, &city, &state, &country).await?;
            }
            LocationAction::List => {
                locations::run_list(&cfg).await?;
            }
        },
        Commands::History { limit } => {
            history::run_history(&cfg, limit).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
