//! Tabular view of flattened records.
//!
//! A [`Table`] is a list of column names plus rows of JSON values, one row
//! per record. It converts back into plain mappings or records, and renders
//! as CSV, JSON or a GitHub-flavored markdown table.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::annotation::{AnnotationRecord, FIELD_NAMES};

/// Table conversion errors
#[derive(Error, Debug)]
pub enum TableError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, TableError>;

/// Rows of values under named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    /// `rows[row_idx][col_idx]`, absent values as `Value::Null`.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table of annotation records with every record field as a column.
    ///
    /// An empty slice gives an empty table with no columns.
    pub fn from_records(records: &[AnnotationRecord]) -> Result<Self> {
        Self::from_items(records, &FIELD_NAMES)
    }

    /// Build a table from any serializable items, picking `columns` from each.
    ///
    /// An empty slice gives an empty table with no columns.
    pub fn from_items<T: Serialize>(items: &[T], columns: &[&str]) -> Result<Self> {
        if items.is_empty() {
            return Ok(Self::default());
        }

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let mut object = match serde_json::to_value(item)? {
                Value::Object(object) => object,
                _ => Map::new(),
            };
            rows.push(
                columns
                    .iter()
                    .map(|&column| object.remove(column).unwrap_or(Value::Null))
                    .collect(),
            );
        }

        Ok(Self {
            columns: columns.iter().map(|&c| c.to_string()).collect(),
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// One column → value mapping per row, keys in column order.
    pub fn to_maps(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Deserialize every row back into `T`.
    pub fn to_items<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.to_maps()
            .into_iter()
            .map(|map| serde_json::from_value(Value::Object(map)).map_err(TableError::from))
            .collect()
    }

    /// Deserialize every row back into an [`AnnotationRecord`].
    pub fn to_records(&self) -> Result<Vec<AnnotationRecord>> {
        self.to_items()
    }

    /// Rows as a pretty-printed JSON array of objects.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_maps())?)
    }

    /// Header line plus one line per row. Absent values are empty cells;
    /// nested values are written as JSON text.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        if !self.columns.is_empty() {
            writer.write_record(&self.columns)?;
        }
        for row in &self.rows {
            writer.write_record(row.iter().map(cell_text))?;
        }
        writer.flush()?;

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Render as a GitHub-flavored markdown table.
    pub fn to_markdown(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut md = String::new();

        // Header row
        md.push('|');
        for column in &self.columns {
            md.push_str(&format!(" {column} |"));
        }
        md.push('\n');

        // Separator row
        md.push('|');
        for _ in &self.columns {
            md.push_str(" --- |");
        }
        md.push('\n');

        // Data rows
        for row in &self.rows {
            md.push('|');
            for cell in row {
                md.push_str(&format!(" {} |", cell_text(cell).replace('|', "\\|")));
            }
            md.push('\n');
        }

        md
    }
}

/// Convert records straight to column → value mappings.
pub fn to_maps(records: &[AnnotationRecord]) -> Result<Vec<Map<String, Value>>> {
    Ok(Table::from_records(records)?.to_maps())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
