//! SKU barcode encoding and image caching
//!
//! # Pipeline
//!
//! | Step | Module | Input |
//! |------|--------|-------|
//! | Payload | [`payload`] | raw SKU |
//! | Cache key | [`key`] | raw SKU |
//! | Symbol | [`code128`] | payload |
//! | Image | [`render`] | symbol + raw SKU caption |
//!
//! Images live in a flat directory of `<key>.png` files with no manifest.

pub mod cache;
pub mod code128;
pub mod key;
pub mod payload;
pub mod render;

pub use cache::{clear_dir, list_entries, BarcodeCache, CacheEntry, ProducedBarcode};
pub use key::cache_key;
pub use payload::encode;
pub use render::{BarcodeRenderer, Code128Renderer, RenderOptions};
