use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// phonequote - Cash trade-in quotes for used iPhones
#[derive(Parser)]
#[command(name = "phonequote")]
#[command(about = "Quote a cash purchase price for a used iPhone")]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file replacing the built-in price list
    #[arg(long, global = true, env = "PHONEQUOTE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quote a device
    Quote {
        /// Model name (e.g., "iPhone 15 Pro")
        #[arg(short, long)]
        model: String,

        /// Storage tier (e.g., "256 GB"); defaults to the first sellable tier
        /// when the session default is not sold for the model
        #[arg(short, long)]
        storage: Option<String>,

        /// Battery health percentage (50-100)
        #[arg(short, long, default_value_t = 100)]
        battery: u8,

        /// Functional check that is not working (repeatable, e.g. speaker)
        #[arg(long = "broken", value_name = "CHECK")]
        broken: Vec<String>,

        /// Cosmetic defect that is present (repeatable, e.g. backCracked)
        #[arg(long = "defect", value_name = "CHECK")]
        defect: Vec<String>,

        /// Show every adjustment applied to reach the quote
        #[arg(long)]
        explain: bool,
    },
    /// List storage tiers sold for a model
    Storage {
        /// Model name
        model: String,
    },
    /// List catalog models
    Models,
    /// List functional and cosmetic checks
    Checks,
    /// Catalog file management
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Write the active catalog to a JSON file
    Export {
        /// Destination path
        path: PathBuf,
    },
    /// Load and validate a catalog file
    Validate {
        /// Catalog file to validate
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
