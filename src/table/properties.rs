use serde::Serialize;

use super::{ParseError, Table};

/// Zero-based position of the properties table among a page's tables.
pub const PROPERTIES_TABLE_INDEX: usize = 5;

/// Header name of the column used as the row key.
pub const KEY_COLUMN: &str = "Parameter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub parameter: String,
    pub values: Vec<String>,
}

/// Galaxy properties keyed by parameter name.
///
/// Parameter names are not checked for uniqueness; lookups return the first
/// matching row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertiesTable {
    columns: Vec<String>,
    rows: Vec<PropertyRow>,
}

impl PropertiesTable {
    /// Reindex a raw table whose first row holds the column names.
    pub fn from_table(table: &Table) -> Result<Self, ParseError> {
        let mut rows = table.rows().iter();
        let missing_key = || ParseError::MissingKeyColumn(KEY_COLUMN.to_string());

        let header = rows.next().ok_or_else(missing_key)?;
        let key = header
            .iter()
            .position(|name| name == KEY_COLUMN)
            .ok_or_else(missing_key)?;

        let columns = without_column(header, key);
        let rows = rows
            .map(|row| PropertyRow {
                parameter: row.get(key).cloned().unwrap_or_default(),
                values: without_column(row, key),
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Value columns, in page order, excluding the key column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.parameter.as_str())
    }

    pub fn get(&self, parameter: &str) -> Option<&PropertyRow> {
        self.rows.iter().find(|row| row.parameter == parameter)
    }

    pub fn value(&self, parameter: &str, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.get(parameter)?.values.get(index).map(String::as_str)
    }
}

/// Derive the properties table from a page's tables.
///
/// Pages with fewer than six tables have no properties section; that is
/// reported as `None`, not as an error.
pub fn extract_properties(tables: &[Table]) -> Result<Option<PropertiesTable>, ParseError> {
    tables
        .get(PROPERTIES_TABLE_INDEX)
        .map(PropertiesTable::from_table)
        .transpose()
}

fn without_column(row: &[String], skip: usize) -> Vec<String> {
    row.iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, cell)| cell.clone())
        .collect()
}
