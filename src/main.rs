//! vecstore CLI - store, fetch and serve color/shape tagged integer vectors

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vecstore::config::{self, VecstoreConfig};
use vecstore::generator::generate_vectors;
use vecstore::storage::{ConnectionPolicy, VectorStore};
use vecstore::ui::{self, Icons};
use vecstore::vector::parse_dimensions;
use vecstore::Vector;

#[derive(Parser)]
#[command(name = "vecstore")]
#[command(version)]
#[command(about = "Store color/shape tagged integer vectors in SQLite and serve them over HTTP")]
#[command(long_about = r#"
vecstore keeps integer vectors with a color and a shape in a SQLite file.
Each vector is stored as one metadata row plus five dimension rows
(shorter vectors are zero-padded, longer ones truncated).

Example usage:
  vecstore init
  vecstore insert --dimensions 5,1,9 --color red --shape circle
  vecstore get --id 1
  vecstore seed --count 50
  vecstore serve --port 8000
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./vecstore.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config and create the database schema
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Connection lifetime: persistent or per_operation
        #[arg(long, value_parser = parse_policy)]
        connection: Option<ConnectionPolicy>,
    },

    /// Store one vector
    Insert {
        /// Integer dimensions, e.g. "5,1,9"
        #[arg(long)]
        dimensions: String,

        /// Vector color
        #[arg(short, long)]
        color: String,

        /// Vector shape
        #[arg(short, long)]
        shape: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Fetch a stored vector by id
    Get {
        /// Vector id
        #[arg(short, long)]
        id: i64,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Insert randomly generated vectors
    Seed {
        /// Number of vectors to generate
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show statistics about the stored vectors
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn parse_policy(value: &str) -> Result<ConnectionPolicy, String> {
    value.parse().map_err(|e: vecstore::Error| e.to_string())
}

fn open_store(
    settings: &VecstoreConfig,
    database: Option<&Path>,
    policy: Option<ConnectionPolicy>,
) -> anyhow::Result<(VectorStore, PathBuf)> {
    let path = settings.prepare_database(database)?;
    let store = VectorStore::open(&path, settings.store_options(policy))
        .with_context(|| format!("failed to open database {}", path.display()))?;
    Ok((store, path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = VecstoreConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { database, force } => {
            let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let mut starter = VecstoreConfig::starter();
            if let Some(db) = &database {
                starter.database = Some(db.display().to_string());
            }

            starter.write(&config_path, force)?;
            let (_store, db_path) = open_store(&starter, None, None)?;

            ui::header("vecstore initialized");
            ui::status(Icons::GEAR, "Config", &config_path.display().to_string());
            ui::status(Icons::DATABASE, "Database", &db_path.display().to_string());
            ui::success("Tables and indexes created");
        }

        Commands::Serve { port, database, connection } => {
            let port = settings.port(port);
            let (store, db_path) = open_store(&settings, database.as_deref(), connection)?;

            ui::header(&format!("Serving vectors from {}", db_path.display()));
            ui::status(Icons::GLOBE, "Listening", &format!("http://0.0.0.0:{}", port));
            ui::status(Icons::GEAR, "Connection", store.policy().as_str());

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(vecstore::server::start_server(port, store))?;
        }

        Commands::Insert { dimensions, color, shape, database } => {
            let dimensions = parse_dimensions(&dimensions)?;
            let (mut store, _) = open_store(&settings, database.as_deref(), None)?;

            let mut vector = Vector::new(dimensions, color, shape);
            let id = store.insert_vector_data(&vector)?;
            vector.set_id(id);

            if vector.length() != vecstore::PERSISTED_DIMENSIONS {
                ui::warn(&format!(
                    "Stored as {} dimensions (vector has {})",
                    vecstore::PERSISTED_DIMENSIONS,
                    vector.length()
                ));
            }
            println!("{}", ui::vector_table(std::slice::from_ref(&vector)));
            ui::vector_summary(&vector);
            ui::success(&format!("Stored vector {}", id));
        }

        Commands::Get { id, database, format } => {
            let (mut store, _) = open_store(&settings, database.as_deref(), None)?;

            let vector = store
                .get_full_vector_data_by_id(id)?
                .ok_or_else(|| anyhow::anyhow!("vector {} not found", id))?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&vector.to_json())?);
            } else {
                println!("{}", ui::vector_table(std::slice::from_ref(&vector)));
                ui::vector_summary(&vector);
            }
        }

        Commands::Seed { count, seed, database } => {
            let (mut store, db_path) = open_store(&settings, database.as_deref(), None)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            ui::header(&format!("Seeding {} vectors into {}", count, db_path.display()));
            let progress = ui::SeedProgress::new(count);
            let mut inserted = 0;
            for vector in generate_vectors(count, &mut rng) {
                match store.insert_vector_data(&vector) {
                    Ok(id) => {
                        inserted += 1;
                        progress.inserted(id);
                    }
                    Err(e) => progress.failed(&e.to_string()),
                }
            }
            progress.finish(inserted);
        }

        Commands::Stats { database } => {
            let (mut store, db_path) = open_store(&settings, database.as_deref(), None)?;
            let stats = store.stats()?;

            ui::section(&format!("{} vecstore statistics ({})", Icons::STATS, db_path.display()));
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}
