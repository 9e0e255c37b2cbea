//! Configuration schema for skulabel
//!
//! Configuration is stored at `~/.config/skulabel/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Reference table settings
    pub table: TableConfig,

    /// Barcode image cache settings
    pub cache: CacheConfig,

    /// Barcode rendering settings
    pub barcode: BarcodeConfig,

    /// Label page settings
    pub label: LabelConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// How SKUs are compared against the reference table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Trimmed query must equal the stored SKU byte for byte
    Exact,
    /// Both sides trimmed and compared case-insensitively
    #[default]
    Normalized,
}

/// Reference table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Spreadsheet holding SKU and description columns
    pub path: PathBuf,

    /// Worksheet name (first sheet when unset)
    pub sheet: Option<String>,

    /// Header of the SKU column
    pub sku_column: String,

    /// Header of the description column
    pub description_column: String,

    /// SKU comparison mode
    pub match_mode: MatchMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sku_list.xlsx"),
            sheet: None,
            sku_column: "SKU".to_string(),
            description_column: "Description".to_string(),
            match_mode: MatchMode::Normalized,
        }
    }
}

/// Barcode image cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding `<key>.png` files
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("skulabel")
                .join("barcodes"),
        }
    }
}

/// Barcode rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeConfig {
    /// Width of one module in pixels
    pub module_width_px: u32,

    /// Height of the bars in pixels
    pub bar_height_px: u32,

    /// Quiet zone on each side, in modules
    pub quiet_zone_modules: u32,

    /// Print the raw SKU under the bars
    pub human_readable: bool,

    /// TrueType font for the caption (caption suppressed when unset)
    pub font: Option<PathBuf>,

    /// Caption height in pixels
    pub font_size_px: f32,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        // 0.25mm x 8mm modules at 300 dpi
        Self {
            module_width_px: 3,
            bar_height_px: 94,
            quiet_zone_modules: 10,
            human_readable: true,
            font: None,
            font_size_px: 36.0,
        }
    }
}

/// Label page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Page width in inches
    pub width_in: f32,

    /// Page height in inches
    pub height_in: f32,

    /// Margin on every side in inches
    pub margin_in: f32,

    /// Width the barcode image is scaled to, in inches
    pub barcode_width_in: f32,

    /// Description font size in points (clamped to 8..=11)
    pub font_size_pt: f32,

    /// Maximum characters per description line
    pub wrap_chars: usize,

    /// Where label files are written (system temp dir when unset)
    pub output_dir: Option<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            width_in: 3.0,
            height_in: 1.0,
            margin_in: 0.05,
            barcode_width_in: 1.83,
            font_size_pt: 11.0,
            wrap_chars: 34,
            output_dir: None,
        }
    }
}

impl LabelConfig {
    /// Resolved output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[table]"));
        assert!(toml.contains("[barcode]"));
        assert!(toml.contains("match_mode = \"normalized\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.table.sku_column, "SKU");
        assert_eq!(config.label.wrap_chars, 34);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [table]
            path = "/srv/labels/skus.xlsx"
            match_mode = "exact"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.table.path, PathBuf::from("/srv/labels/skus.xlsx"));
        assert_eq!(config.table.match_mode, MatchMode::Exact);
        assert_eq!(config.table.description_column, "Description"); // default preserved
        assert_eq!(config.barcode.module_width_px, 3);
    }

    #[test]
    fn output_dir_defaults_to_temp() {
        let label = LabelConfig::default();
        assert_eq!(label.output_dir(), std::env::temp_dir());
    }
}
