//! Cache-keyed barcode image producer
//!
//! A key moves through `absent -> rendering -> present` exactly once. There
//! is no lock around the render: two processes racing on a never-seen SKU
//! both render and the last write wins. A per-key mutex around
//! [`BarcodeCache::produce`] is the place to add one if concurrent callers
//! ever appear.

use super::key::cache_key;
use super::payload;
use super::render::BarcodeRenderer;
use crate::error::{LabelError, LabelResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a produce call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedBarcode {
    /// Image file for the SKU
    pub path: PathBuf,
    /// Payload the symbol encodes (or would encode, on a hit)
    pub payload: String,
    /// Whether an existing file was reused
    pub cache_hit: bool,
}

/// Barcode images addressed by cache key
pub struct BarcodeCache<R> {
    dir: PathBuf,
    renderer: R,
    caption: bool,
}

impl<R: BarcodeRenderer> BarcodeCache<R> {
    /// Cache rooted at `dir`, rendering misses with `renderer`
    pub fn new(dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            dir: dir.into(),
            renderer,
            caption: true,
        }
    }

    /// Print the raw SKU under the bars (default) or suppress the caption
    pub fn with_caption(mut self, caption: bool) -> Self {
        self.caption = caption;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Path the image for `raw_sku` lives at
    pub fn image_path(&self, raw_sku: &str) -> PathBuf {
        self.dir.join(format!("{}.png", cache_key(raw_sku)))
    }

    /// Return the cached image for `raw_sku`, rendering it on a miss
    ///
    /// A present file is returned as-is, without checking its contents or
    /// whether it was rendered under the current settings.
    pub fn produce(&self, raw_sku: &str) -> LabelResult<ProducedBarcode> {
        let sku = raw_sku.trim();
        if sku.is_empty() {
            return Err(LabelError::InvalidSku);
        }

        let payload = payload::encode(sku);
        let path = self.image_path(sku);

        if path.exists() {
            debug!("Barcode already cached at {}", path.display());
            return Ok(ProducedBarcode {
                path,
                payload,
                cache_hit: true,
            });
        }

        // The final path only ever holds a complete image
        let staging = staging_path(&path);
        debug!("Rendering {} (payload {}) to {}", sku, payload, staging.display());
        let caption = self.caption.then_some(sku);
        if let Err(e) = self.renderer.render(&payload, caption, &staging) {
            discard(&staging);
            return Err(e);
        }

        if !staging.exists() {
            warn!("Expected barcode at {} but it was not found", staging.display());
            return Err(LabelError::ImageMissing(path));
        }
        if let Err(e) = fs::rename(&staging, &path) {
            discard(&staging);
            return Err(LabelError::io(
                format!("moving barcode into place at {}", path.display()),
                e,
            ));
        }

        info!("Barcode generated at {}", path.display());
        Ok(ProducedBarcode {
            path,
            payload,
            cache_hit: false,
        })
    }
}

/// A cached image on disk
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub key: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// List cached images, oldest first
pub fn list_entries(dir: &Path) -> LabelResult<Vec<CacheEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let reader = fs::read_dir(dir)
        .map_err(|e| LabelError::io(format!("reading cache directory {}", dir.display()), e))?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|e| LabelError::io("reading cache entry", e))?;
        let path = entry.path();
        if !is_cached_image(&path) {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| LabelError::io(format!("reading metadata of {}", path.display()), e))?;
        let key = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        entries.push(CacheEntry {
            key,
            size_bytes: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            path,
        });
    }

    entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.key.cmp(&b.key)));
    Ok(entries)
}

/// Remove every cached image, returning how many were removed
///
/// Files that are not `.png` are left alone.
pub fn clear_dir(dir: &Path) -> LabelResult<usize> {
    let entries = list_entries(dir)?;
    for entry in &entries {
        fs::remove_file(&entry.path).map_err(|e| {
            LabelError::io(format!("removing cache file {}", entry.path.display()), e)
        })?;
    }
    debug!("Removed {} cached barcode(s) from {}", entries.len(), dir.display());
    Ok(entries.len())
}

/// `<key>.png.tmp` next to the final image
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove partial barcode {}: {}", path.display(), e);
        }
    }
}

fn is_cached_image(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "png")
}
