//! albumctl CLI - album lookups and inserts against PostgreSQL
//!
//! Without a subcommand it runs the demo sequence:
//! diagnostic greeting, albums by artist, album by id, insert.
//! The exit status tells which stage failed (see `stage`).

use std::io;
use std::process::ExitCode;

use albumctl_store::pool::DEFAULT_MAX_CONNECTIONS;
use albumctl_store::{create_pool_with_options, AlbumRepo, MemoryAlbumStore, DEFAULT_TIMEOUT_SECS};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod output;
mod stage;
mod tracing_setup;

use commands::Ctx;
use config::DatabaseConfig;
use output::{Format, Printer};
use stage::{Stage, StageError, StageExt};

const DEFAULT_ARTIST: &str = "John Coltrane";
const DEFAULT_ID: i64 = 2;
const DEFAULT_TITLE: &str = "The Modern Sound of Betty Carter";
const DEFAULT_NEW_ARTIST: &str = "Betty Carter";
const DEFAULT_PRICE: f64 = 49.99;

#[derive(Parser, Debug)]
#[command(
    name = "albumctl",
    author,
    version,
    about = "Look up and insert albums in a PostgreSQL database"
)]
struct Cli {
    /// Database URL (overrides .env files)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "ALBUMCTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS, global = true)]
    max_connections: u32,

    /// Per-operation deadline in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Use an in-memory store seeded with sample albums (no database required)
    #[arg(long, global = true)]
    in_memory: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Greeting, lookup by artist, lookup by id, then insert (the default)
    Demo(DemoArgs),
    /// List albums by an artist
    ByArtist {
        /// Artist name (exact match)
        name: String,
    },
    /// Show the album with the given id
    Get {
        /// Album id
        id: i64,
    },
    /// Insert an album and print its new id
    Add(AddArgs),
    /// Create the album table if it does not exist
    Migrate,
    /// Insert the sample albums
    Seed,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Artist to look up
    #[arg(long, default_value = DEFAULT_ARTIST)]
    artist: String,

    /// Album id to look up
    #[arg(long, default_value_t = DEFAULT_ID)]
    id: i64,

    /// Title of the album to insert
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Artist of the album to insert
    #[arg(long, default_value = DEFAULT_NEW_ARTIST)]
    new_artist: String,

    /// Price of the album to insert
    #[arg(long, default_value_t = DEFAULT_PRICE)]
    price: f64,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            artist: DEFAULT_ARTIST.to_string(),
            id: DEFAULT_ID,
            title: DEFAULT_TITLE.to_string(),
            new_artist: DEFAULT_NEW_ARTIST.to_string(),
            price: DEFAULT_PRICE,
        }
    }
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Album title
    #[arg(long)]
    title: String,

    /// Album artist
    #[arg(long)]
    artist: String,

    /// Album price
    #[arg(long)]
    price: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    for path in &env_files {
        debug!("Loaded .env from {}", path.display());
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), StageError> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Demo(DemoArgs::default()));
    let deadline = config::deadline(cli.timeout_secs).stage(Stage::Connect)?;
    let format = if cli.json { Format::Json } else { Format::Text };
    let out = Printer::new(format, io::stdout().lock());

    if cli.in_memory {
        info!("Using in-memory album store");
        let store = MemoryAlbumStore::with_sample_albums();
        let mut ctx = Ctx {
            store: &store,
            pool: None,
            deadline,
            out,
        };
        return commands::dispatch(command, &mut ctx).await;
    }

    let db = DatabaseConfig::resolve(cli.database_url, cli.max_connections).stage(Stage::Connect)?;
    info!("Connecting to {}", db.redacted_url());

    let pool = create_pool_with_options(&db.url, db.pool)
        .await
        .context("unable to create connection pool")
        .stage(Stage::Connect)?;

    let repo = AlbumRepo::new(&pool);
    let mut ctx = Ctx {
        store: &repo,
        pool: Some(&pool),
        deadline,
        out,
    };
    let outcome = commands::dispatch(command, &mut ctx).await;

    // Close on success and failure alike once the pool exists
    pool.close().await;
    outcome
}
