mod html;
mod properties;

pub use html::read_html;
pub use properties::{
    extract_properties, PropertiesTable, PropertyRow, KEY_COLUMN, PROPERTIES_TABLE_INDEX,
};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No tables found in document")]
    NoTables,
    #[error("Properties table has no {0:?} column")]
    MissingKeyColumn(String),
}

/// A rectangular table of cell text, in document row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, padding every row (and the column list) to the widest row.
    /// Missing column names become positional labels.
    pub fn new(mut columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(columns.len()))
            .max()
            .unwrap_or(0);

        while columns.len() < width {
            columns.push(columns.len().to_string());
        }
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}
