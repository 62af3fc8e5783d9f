use serde::{Deserialize, Serialize};

use crate::error::{LabelMapError, Result};

/// An already-parsed table: a header of column names and rows of text cells.
///
/// Every row has exactly one cell per column. The table is kept verbatim by
/// the map it was loaded into and is not consulted after the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Fails with `RowWidth` if the cell count does not match
    /// the header.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(LabelMapError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style `push_row`.
    pub fn with_row<I, S>(mut self, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells)?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve a column name, failing with `InvalidConfiguration` when the
    /// header does not contain it.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            LabelMapError::InvalidConfiguration(format!(
                "column `{}` not found in table header {:?}",
                name, self.columns
            ))
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[String]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Row count, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check that every row matches the header width. Tables built through
    /// `push_row` always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(LabelMapError::RowWidth {
                    row: i,
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }
}
