//! skulabel - SKU barcode label generator
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use skulabel::cli::args::{ConfigAction, ConfigArgs};
use skulabel::cli::{commands, Cli, Commands};
use skulabel::config::{Config, ConfigManager};
use skulabel::error::LabelResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LabelResult<()> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    // `config init` must work even when the existing file is broken
    let initializing = matches!(
        cli.command,
        Some(Commands::Config(ConfigArgs {
            action: Some(ConfigAction::Init { .. })
        }))
    );
    let mut config = if initializing {
        Config::default()
    } else {
        manager.load().await?
    };
    apply_overrides(&cli, &mut config);

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config {}", manager.path().display());

    match cli.command {
        None | Some(Commands::Interactive) => commands::interactive(&config).await,
        Some(Commands::Label(args)) => commands::label(args, &config).await,
        Some(Commands::Lookup(args)) => commands::lookup(args, &config).await,
        Some(Commands::Barcode(args)) => commands::barcode(args, &config).await,
        Some(Commands::Cache(args)) => commands::cache(args, &config).await,
        Some(Commands::Config(args)) => commands::config(args, &manager, &config).await,
    }
}

/// Command-line flags win over the config file
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(ref table) = cli.table {
        config.table.path = table.clone();
    }
    if let Some(ref dir) = cli.cache_dir {
        config.cache.dir = dir.clone();
    }
    if let Some(ref dir) = cli.output_dir {
        config.label.output_dir = Some(dir.clone());
    }
}

/// 0 = warn (ui output only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("skulabel=warn"),
        1 => EnvFilter::new("skulabel=info"),
        _ => EnvFilter::new("skulabel=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
