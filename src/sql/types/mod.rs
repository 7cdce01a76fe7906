use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A stored value: raw text, or absent when no value was supplied
pub type Value = Option<String>;

/// One stored record, an ordered column name to value mapping
///
/// Rows carry whatever columns the inserting statement named, which need
/// not match the table's declared columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column's value
    ///
    /// A column already present keeps its position and takes the new value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Returns the column's text, None when the column is missing or absent
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copies out only the given columns, in the given order
    ///
    /// Columns the row lacks come back as absent entries.
    pub fn project(&self, columns: &[String]) -> Row {
        let mut projected = Row::new();
        for column in columns {
            projected.set(column.clone(), self.get(column).map(str::to_string));
        }
        projected
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.set(column, value);
        }
        row
    }
}

/// Renders as `{name: Ann, age: 30}`, absent values are left out
impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let present = self
            .iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)));
        for (i, (name, value)) in present.enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
