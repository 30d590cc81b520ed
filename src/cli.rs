use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pokedex-to-sqlite")]
#[command(version, about = "Ingest the Pokémon GO pokedex into a SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the pokedex (if needed) and ingest it into SQLite
    Sync {
        /// Output SQLite database path
        output_db: PathBuf,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,
    },

    /// Download the latest pokedex JSON file
    Download {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Ingest a local pokedex JSON file into a SQLite database
    Ingest {
        /// Path to the pokedex JSON file
        input_json: PathBuf,

        /// Output SQLite database path
        output_db: PathBuf,
    },

    /// List every pokemon name in the database
    ListNames {
        /// SQLite database path
        db: PathBuf,
    },

    /// Show the full profile for one pokemon
    Profile {
        /// SQLite database path
        db: PathBuf,

        /// Pokemon display name (as stored)
        name: String,
    },

    /// Show the evolution chain containing one pokemon
    Chain {
        /// SQLite database path
        db: PathBuf,

        /// Pokemon display name (as stored)
        name: String,
    },

    /// List all table names in the schema
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
