//! Label composition
//!
//! Labels are rebuilt on every request; only barcode images are cached.

pub mod layout;
pub mod pdf;
pub mod print_page;

pub use layout::{wrap_words, LabelLayout};

use crate::barcode::cache_key;
use crate::config::LabelConfig;
use crate::error::{LabelError, LabelResult};
use std::path::PathBuf;

/// Everything needed to print one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Trimmed SKU as typed by the operator
    pub sku: String,
    pub description: String,
    pub image_path: PathBuf,
    /// Payload the barcode encodes
    pub payload: String,
}

/// Turns labels into printable documents
#[derive(Debug, Clone)]
pub struct LabelComposer {
    config: LabelConfig,
}

impl LabelComposer {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    /// PDF bytes for `label`
    pub fn compose_pdf(&self, label: &Label) -> LabelResult<Vec<u8>> {
        if !label.image_path.exists() {
            return Err(LabelError::ImageMissing(label.image_path.clone()));
        }
        let image = image::open(&label.image_path)?.to_luma8();
        let layout = LabelLayout::compute(&self.config, image.dimensions(), &label.description);
        pdf::write_label_pdf(&layout, &image, &label.sku)
    }

    /// Self-printing HTML page for `label`
    pub fn compose_print_page(&self, label: &Label) -> LabelResult<String> {
        let png = std::fs::read(&label.image_path)
            .map_err(|_| LabelError::ImageMissing(label.image_path.clone()))?;
        Ok(print_page::render_print_page(
            &self.config,
            &label.sku,
            &label.description,
            &png,
        ))
    }

    /// Filesystem-safe base name for a label's output files
    pub fn file_stem(sku: &str) -> String {
        format!("label_{}", cache_key(sku))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::TempDir;

    fn label_with_image(temp: &TempDir) -> Label {
        let path = temp.path().join("img.png");
        GrayImage::from_pixel(60, 20, Luma([0])).save(&path).unwrap();
        Label {
            sku: "ABC123".to_string(),
            description: "Widget A".to_string(),
            image_path: path,
            payload: "ABC123".to_string(),
        }
    }

    #[test]
    fn compose_pdf_from_image() {
        let temp = TempDir::new().unwrap();
        let label = label_with_image(&temp);
        let composer = LabelComposer::new(LabelConfig::default());

        let pdf = composer.compose_pdf(&label).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn compose_pdf_missing_image() {
        let temp = TempDir::new().unwrap();
        let mut label = label_with_image(&temp);
        label.image_path = temp.path().join("gone.png");

        let err = LabelComposer::new(LabelConfig::default())
            .compose_pdf(&label)
            .unwrap_err();
        assert!(matches!(err, LabelError::ImageMissing(_)));
    }

    #[test]
    fn print_page_embeds_png() {
        let temp = TempDir::new().unwrap();
        let label = label_with_image(&temp);
        let page = LabelComposer::new(LabelConfig::default())
            .compose_print_page(&label)
            .unwrap();
        assert!(page.contains("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn file_stem_is_safe() {
        let stem = LabelComposer::file_stem("a/b\\c");
        assert!(stem.starts_with("label_"));
        assert!(!stem.contains('/') && !stem.contains('\\'));
    }
}
