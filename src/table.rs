//! SKU reference table
//!
//! Loaded once at startup from a spreadsheet and handed to the label
//! pipeline as an immutable value.

use crate::config::{MatchMode, TableConfig};
use crate::error::{LabelError, LabelResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// A row of the reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuEntry {
    /// SKU as stored in the table, trimmed
    pub sku: String,
    pub description: String,
}

/// Something that can describe a SKU
pub trait DescriptionSource {
    /// Stored entry matching `sku`, or `None` when the SKU is unknown
    ///
    /// The returned SKU is the table's spelling, which may differ from the
    /// query in case and whitespace.
    fn lookup(&self, sku: &str) -> Option<&SkuEntry>;
}

/// In-memory SKU -> description table
#[derive(Debug, Clone)]
pub struct SkuTable {
    entries: HashMap<String, SkuEntry>,
    mode: MatchMode,
}

impl SkuTable {
    /// Build from `(sku, description)` rows; the first row for a SKU wins
    pub fn from_rows<I, S, D>(rows: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: Into<String>,
    {
        let mut entries = HashMap::new();
        for (sku, description) in rows {
            let sku = sku.as_ref();
            let key = normalize(mode, sku);
            if key.trim().is_empty() {
                continue;
            }
            entries.entry(key).or_insert_with(|| SkuEntry {
                sku: sku.trim().to_string(),
                description: description.into(),
            });
        }
        Self { entries, mode }
    }

    /// Load the table described by `config`
    pub fn load(config: &TableConfig) -> LabelResult<Self> {
        let path = &config.path;
        if !path.is_file() {
            return Err(LabelError::ResourceMissing {
                what: "reference table",
                path: path.clone(),
            });
        }

        let range = read_sheet(path, config.sheet.as_deref())?;
        let table = Self::from_range(&range, config).map_err(|reason| LabelError::TableRead {
            path: path.clone(),
            reason,
        })?;

        info!("Loaded {} SKU(s) from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a worksheet: find the header row, then read SKU/description pairs
    pub fn from_range(range: &Range<Data>, config: &TableConfig) -> Result<Self, String> {
        let mut rows = range.rows();

        let (sku_col, desc_col) = loop {
            let Some(row) = rows.next() else {
                return Err(format!(
                    "no header row with columns '{}' and '{}'",
                    config.sku_column, config.description_column
                ));
            };
            let find = |name: &str| {
                row.iter()
                    .position(|cell| cell_text(cell).trim().eq_ignore_ascii_case(name))
            };
            if let (Some(s), Some(d)) = (
                find(&config.sku_column),
                find(&config.description_column),
            ) {
                break (s, d);
            }
        };
        debug!("SKU column {}, description column {}", sku_col, desc_col);

        let pairs = rows.map(|row| {
            let sku = row.get(sku_col).map(cell_text).unwrap_or_default();
            let description = row.get(desc_col).map(cell_text).unwrap_or_default();
            (sku, description.trim().to_string())
        });

        Ok(Self::from_rows(pairs, config.match_mode))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DescriptionSource for SkuTable {
    fn lookup(&self, sku: &str) -> Option<&SkuEntry> {
        let key = match self.mode {
            MatchMode::Exact => sku.trim().to_string(),
            MatchMode::Normalized => normalize(self.mode, sku),
        };
        self.entries.get(&key)
    }
}

fn read_sheet(path: &Path, sheet: Option<&str>) -> LabelResult<Range<Data>> {
    let read_err = |reason: String| LabelError::TableRead {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_err(e.to_string()))?;

    match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| read_err(format!("sheet '{}': {}", name, e))),
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| read_err("workbook has no sheets".to_string()))?
            .map_err(|e| read_err(e.to_string())),
    }
}

/// Key used for storage; exact mode keeps cells untouched
fn normalize(mode: MatchMode, sku: &str) -> String {
    match mode {
        MatchMode::Exact => sku.to_string(),
        MatchMode::Normalized => sku.trim().to_lowercase(),
    }
}

/// Cell contents as text; whole floats lose their `.0`
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sheet(rows: &[&[Data]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn description<'a>(table: &'a SkuTable, sku: &str) -> Option<&'a str> {
        table.lookup(sku).map(|e| e.description.as_str())
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn normalized_lookup_ignores_case_and_whitespace() {
        let table = SkuTable::from_rows([("ABC123", "Widget A")], MatchMode::Normalized);
        assert_eq!(description(&table, "ABC123"), Some("Widget A"));
        assert_eq!(description(&table, "  abc123 "), Some("Widget A"));
        assert_eq!(description(&table, "ABC124"), None);
    }

    #[test]
    fn lookup_returns_stored_spelling() {
        let table = SkuTable::from_rows([(" ABC123 ", "Widget A")], MatchMode::Normalized);
        let entry = table.lookup("abc123").unwrap();
        assert_eq!(entry.sku, "ABC123");
        assert_eq!(entry.description, "Widget A");
    }

    #[test]
    fn exact_lookup_is_case_sensitive() {
        let table = SkuTable::from_rows([("ABC123", "Widget A")], MatchMode::Exact);
        assert_eq!(description(&table, "ABC123"), Some("Widget A"));
        assert_eq!(description(&table, " ABC123 "), Some("Widget A"));
        assert_eq!(description(&table, "abc123"), None);
    }

    #[test]
    fn first_duplicate_wins_and_blank_skus_skipped() {
        let table = SkuTable::from_rows(
            [("X1", "first"), ("x1", "second"), ("  ", "blank")],
            MatchMode::Normalized,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(description(&table, "X1"), Some("first"));
    }

    #[test]
    fn range_with_header_row() {
        let range = sheet(&[
            &[s("Inventory export"), Data::Empty],
            &[s("sku"), s("DESCRIPTION")],
            &[s("ABC123"), s("Widget A ")],
            &[Data::Float(999.0), s("Float SKU")],
            &[Data::Int(42), s("Int SKU")],
            &[Data::Empty, s("orphan")],
        ]);

        let table = SkuTable::from_range(&range, &TableConfig::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(description(&table, "ABC123"), Some("Widget A"));
        assert_eq!(description(&table, "999"), Some("Float SKU"));
        assert_eq!(description(&table, "42"), Some("Int SKU"));
    }

    #[test]
    fn custom_columns_in_any_order() {
        let range = sheet(&[
            &[s("Label"), s("Code")],
            &[s("Gadget"), s("G-1")],
        ]);
        let config = TableConfig {
            sku_column: "Code".to_string(),
            description_column: "Label".to_string(),
            ..TableConfig::default()
        };

        let table = SkuTable::from_range(&range, &config).unwrap();
        assert_eq!(description(&table, "g-1"), Some("Gadget"));
    }

    #[test]
    fn missing_header_is_error() {
        let range = sheet(&[&[s("Code"), s("Name")], &[s("A"), s("B")]]);
        let err = SkuTable::from_range(&range, &TableConfig::default()).unwrap_err();
        assert!(err.contains("'SKU'"));
    }

    #[test]
    fn missing_file_is_resource_missing() {
        let config = TableConfig {
            path: PathBuf::from("/nonexistent/skulabel/sku_list.xlsx"),
            ..TableConfig::default()
        };
        let err = SkuTable::load(&config).unwrap_err();
        assert!(matches!(
            err,
            LabelError::ResourceMissing {
                what: "reference table",
                ..
            }
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn unreadable_file_is_table_read() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("sku_list.xlsx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let config = TableConfig {
            path,
            ..TableConfig::default()
        };
        let err = SkuTable::load(&config).unwrap_err();
        assert!(matches!(err, LabelError::TableRead { .. }));
    }
}
