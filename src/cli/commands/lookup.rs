//! Lookup command - print a SKU's description

use crate::cli::args::LookupArgs;
use crate::config::Config;
use crate::error::{LabelError, LabelResult};
use crate::table::{DescriptionSource, SkuTable};

/// Execute the lookup command
///
/// Only the reference table is loaded; nothing is rendered.
pub async fn execute(args: LookupArgs, config: &Config) -> LabelResult<()> {
    let sku = args.sku.trim();
    if sku.is_empty() {
        return Err(LabelError::InvalidSku);
    }

    let table = SkuTable::load(&config.table)?;
    let entry = table
        .lookup(sku)
        .ok_or_else(|| LabelError::LookupMiss(sku.to_string()))?;
    println!("{}", entry.description);
    Ok(())
}
