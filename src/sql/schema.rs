use serde::{Deserialize, Serialize};

use crate::sql::types::Row;

/// Table schema definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Declares a column, a repeated name keeps its position and takes the new type
    pub fn add_column(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => existing.datatype = column.datatype,
            None => self.columns.push(column),
        }
    }

    /// Looks up a declared column by name
    pub fn get_column(&self, col_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == col_name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Column schema definition
///
/// Type tags are never interpreted, and a definition without one keeps None.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: Option<String>,
}

/// A table's schema together with its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub schema: Table,
    pub rows: Vec<Row>,
}
