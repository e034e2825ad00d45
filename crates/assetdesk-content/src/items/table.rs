//! Tabular view of a pipe-delimited item file.

use assetdesk_core::{Error, Result};
use serde::Serialize;

/// Column name whose cells keep their inner line breaks.
pub const TIP_COLUMN: &str = "tip";

/// Rows of an item file, one cell per header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ItemTable {
    /// Create a table. Every row must have exactly one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::invalid(format!(
                "Row {index} has {} cells, expected {}",
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Rows are already one cell per header.
    pub(crate) fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row by index.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Index of a column. Exact matches win over case-insensitive ones.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).or_else(|| {
            self.headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        })
    }

    /// Cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Replace the column names. Cells stay where they are.
    pub fn rename_headers(&mut self, headers: Vec<String>) -> Result<()> {
        if headers.len() != self.headers.len() {
            return Err(Error::invalid(format!(
                "Expected {} header names, got {}",
                self.headers.len(),
                headers.len()
            )));
        }
        self.headers = headers;
        Ok(())
    }

    /// Append a row. Short rows are padded with empty cells.
    pub fn push_row(&mut self, mut cells: Vec<String>) -> Result<()> {
        if cells.len() > self.headers.len() {
            return Err(Error::invalid(format!(
                "Expected at most {} values, got {}",
                self.headers.len(),
                cells.len()
            )));
        }
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        Ok(())
    }

    /// Replace one cell, addressed by row index and column name.
    pub fn set_cell(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let col = self
            .column_index(column)
            .ok_or_else(|| Error::invalid(format!("No column named '{column}'")))?;
        let count = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or_else(|| Error::invalid(format!("Row {row} out of range ({count} rows)")))?;
        cells[col] = value.into();
        Ok(())
    }
}
