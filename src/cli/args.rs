//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// skulabel - SKU barcode label generator
///
/// Looks SKUs up in a reference spreadsheet, renders Code 128 barcodes
/// and writes printable labels.
#[derive(Parser, Debug)]
#[command(name = "skulabel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (interactive prompt when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SKULABEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference spreadsheet (overrides table.path)
    #[arg(long, global = true, env = "SKULABEL_TABLE")]
    pub table: Option<PathBuf>,

    /// Barcode image cache directory (overrides cache.dir)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Directory for label files (overrides label.output_dir)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a label for one SKU
    Label(LabelArgs),

    /// Print the description stored for a SKU
    Lookup(LookupArgs),

    /// Render (or reuse) the barcode image for a SKU
    Barcode(BarcodeArgs),

    /// Prompt for SKUs until `exit`
    Interactive,

    /// Manage the barcode image cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the label command
#[derive(Parser, Debug)]
pub struct LabelArgs {
    /// SKU to label
    pub sku: String,

    /// Write the PDF here instead of the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the label with the system viewer
    #[arg(long)]
    pub open: bool,

    /// Also write an HTML page that prints itself when opened
    #[arg(long)]
    pub print_page: bool,
}

/// Arguments for the lookup command
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// SKU to look up
    pub sku: String,
}

/// Arguments for the barcode command
#[derive(Parser, Debug)]
pub struct BarcodeArgs {
    /// SKU to encode (not checked against the table)
    pub sku: String,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cache directory
    Path,

    /// List cached barcode images
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove every cached barcode image
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., table.path)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
