//! Cache command - inspect or wipe the barcode image cache

use crate::barcode::{clear_dir, list_entries, CacheEntry};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::LabelResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> LabelResult<()> {
    match args.action {
        CacheAction::Path => {
            println!("{}", config.cache.dir.display());
            Ok(())
        }
        CacheAction::List { format } => list_cache(config, format),
        CacheAction::Clear { yes } => clear_cache(config, yes).await,
    }
}

fn list_cache(config: &Config, format: OutputFormat) -> LabelResult<()> {
    let entries = list_entries(&config.cache.dir)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.path.display());
            }
        }
        OutputFormat::Table if entries.is_empty() => println!("No cached barcodes."),
        OutputFormat::Table => print_cache_table(&entries),
    }

    Ok(())
}

fn print_cache_table(entries: &[CacheEntry]) {
    println!("{:<52} {:>10} {:<17}", "KEY", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(81));

    for entry in entries {
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<52} {:>10} {:<17}",
            entry.key,
            format_size(entry.size_bytes),
            modified
        );
    }

    println!();
    let total: u64 = entries.iter().map(|e| e.size_bytes).sum();
    println!(
        "Total: {} barcode(s), {}",
        entries.len(),
        format_size(total)
    );
}

async fn clear_cache(config: &Config, skip_confirm: bool) -> LabelResult<()> {
    let ctx = UiContext::detect().with_auto_yes(skip_confirm);
    let dir = &config.cache.dir;
    let entries = list_entries(dir)?;

    if entries.is_empty() {
        println!("No cached barcodes to clear.");
        return Ok(());
    }

    println!(
        "This will remove {} cached barcode(s) from {}",
        entries.len(),
        dir.display()
    );
    if !ui::confirm(&ctx, "Clear the barcode cache?", false).await? {
        ui::step_warn_hint(&ctx, "Aborted", "Pass --yes to clear without a prompt");
        return Ok(());
    }

    let removed = clear_dir(dir)?;
    println!("{} cleared {} barcode(s)", style("✓").green(), removed);
    Ok(())
}

fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}
