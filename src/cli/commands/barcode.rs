//! Barcode command - produce the cached image for a SKU

use crate::barcode::{BarcodeCache, Code128Renderer};
use crate::cli::args::BarcodeArgs;
use crate::config::{Config, ConfigManager};
use crate::error::LabelResult;
use crate::ui::{self, UiContext};

/// Execute the barcode command
///
/// The SKU is not checked against the reference table.
pub async fn execute(args: BarcodeArgs, config: &Config) -> LabelResult<()> {
    let ctx = UiContext::detect();
    ConfigManager::ensure_cache_dir(config).await?;

    let renderer = Code128Renderer::from_config(&config.barcode)?;
    let cache = BarcodeCache::new(&config.cache.dir, renderer)
        .with_caption(config.barcode.human_readable);

    let produced = cache.produce(&args.sku)?;
    if ctx.use_fancy_output() {
        ui::barcode_summary(&ctx, &produced);
    } else {
        println!("{}", produced.path.display());
    }
    Ok(())
}
