//! CLI command implementations

pub mod barcode;
pub mod cache;
pub mod config;
pub mod interactive;
pub mod label;
pub mod lookup;

pub use barcode::execute as barcode;
pub use cache::execute as cache;
pub use config::execute as config;
pub use interactive::execute as interactive;
pub use label::execute as label;
pub use lookup::execute as lookup;

use crate::barcode::{BarcodeCache, Code128Renderer};
use crate::config::{Config, ConfigManager};
use crate::error::LabelResult;
use crate::label::LabelComposer;
use crate::service::LabelService;
use crate::table::SkuTable;
use tracing::{debug, warn};

/// Label service as configured for this process
pub type ConfiguredService = LabelService<SkuTable, Code128Renderer>;

/// Check startup resources and wire the label pipeline
///
/// Every error returned here is fatal.
pub async fn build_service(config: &Config) -> LabelResult<ConfiguredService> {
    ConfigManager::ensure_cache_dir(config).await?;

    let table = SkuTable::load(&config.table)?;
    if table.is_empty() {
        warn!("Reference table {} has no SKUs", config.table.path.display());
    }

    let renderer = Code128Renderer::from_config(&config.barcode)?;
    if config.barcode.human_readable && !renderer.has_font() {
        debug!("No caption font configured, barcodes will have no caption");
    }

    let cache = BarcodeCache::new(&config.cache.dir, renderer)
        .with_caption(config.barcode.human_readable);
    let composer = LabelComposer::new(config.label.clone());

    Ok(LabelService::new(table, cache, composer))
}
