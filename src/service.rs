//! Label request pipeline
//!
//! `lookup -> barcode image -> label document`. The reference table is
//! injected; nothing here reads process-wide state.

use crate::barcode::{BarcodeCache, BarcodeRenderer, ProducedBarcode};
use crate::error::{LabelError, LabelResult};
use crate::label::{Label, LabelComposer};
use crate::table::{DescriptionSource, SkuEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Files written for one label request
#[derive(Debug, Clone)]
pub struct ExportedLabel {
    pub label: Label,
    pub pdf_path: PathBuf,
    pub print_page_path: Option<PathBuf>,
    pub cache_hit: bool,
}

/// Handles label requests one at a time
pub struct LabelService<T, R> {
    table: T,
    cache: BarcodeCache<R>,
    composer: LabelComposer,
}

impl<T: DescriptionSource, R: BarcodeRenderer> LabelService<T, R> {
    pub fn new(table: T, cache: BarcodeCache<R>, composer: LabelComposer) -> Self {
        Self {
            table,
            cache,
            composer,
        }
    }

    pub fn cache(&self) -> &BarcodeCache<R> {
        &self.cache
    }

    /// Table entry for a SKU, `LookupMiss` when unknown
    pub fn describe(&self, raw_sku: &str) -> LabelResult<&SkuEntry> {
        let sku = raw_sku.trim();
        if sku.is_empty() {
            return Err(LabelError::InvalidSku);
        }
        self.table
            .lookup(sku)
            .ok_or_else(|| LabelError::LookupMiss(sku.to_string()))
    }

    /// Barcode image for a SKU, skipping the table
    pub fn barcode(&self, raw_sku: &str) -> LabelResult<ProducedBarcode> {
        self.cache.produce(raw_sku)
    }

    /// Look the SKU up and make sure its barcode image exists
    ///
    /// The barcode is made from the table's spelling of the SKU, so every
    /// query matching one row shares one image. A miss returns before the
    /// cache is touched.
    pub fn prepare(&self, raw_sku: &str) -> LabelResult<(Label, bool)> {
        let entry = self.describe(raw_sku)?;
        let produced = self.cache.produce(&entry.sku)?;

        let label = Label {
            sku: entry.sku.clone(),
            description: entry.description.clone(),
            image_path: produced.path,
            payload: produced.payload,
        };
        Ok((label, produced.cache_hit))
    }

    /// Build a label and write it as PDF (and optionally a print page)
    ///
    /// `dest` overrides the PDF path; otherwise files land in `output_dir`.
    pub fn export(
        &self,
        raw_sku: &str,
        output_dir: &Path,
        dest: Option<&Path>,
        with_print_page: bool,
    ) -> LabelResult<ExportedLabel> {
        let (label, cache_hit) = self.prepare(raw_sku)?;
        let pdf = self.composer.compose_pdf(&label)?;

        let stem = LabelComposer::file_stem(&label.sku);
        let pdf_path = match dest {
            Some(path) => path.to_path_buf(),
            None => output_dir.join(format!("{}.pdf", stem)),
        };
        write_file(&pdf_path, &pdf)?;
        info!("Label for {} saved as {}", label.sku, pdf_path.display());

        let print_page_path = if with_print_page {
            let page = self.composer.compose_print_page(&label)?;
            let path = pdf_path.with_extension("html");
            write_file(&path, page.as_bytes())?;
            debug!("Print page written to {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(ExportedLabel {
            label,
            pdf_path,
            print_page_path,
            cache_hit,
        })
    }
}

fn write_file(path: &Path, data: &[u8]) -> LabelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| LabelError::io(format!("creating directory {}", parent.display()), e))?;
    }
    fs::write(path, data).map_err(|e| LabelError::io(format!("writing {}", path.display()), e))
}
