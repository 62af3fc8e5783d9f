use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::{self, Table};
use crate::types::IdType;

fn default_id_type() -> String {
    IdType::default().to_string()
}

/// Where a map's rows come from.
///
/// Deserialized untagged: a JSON string is a CSV path, an object with
/// `columns`/`rows` is an inline table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableSource {
    Path(PathBuf),
    Table(Table),
}

impl TableSource {
    /// Produce the parsed table, reading the CSV file for path sources.
    pub fn load(self) -> Result<Table> {
        match self {
            TableSource::Path(path) => source::read_csv_path(path),
            TableSource::Table(table) => {
                table.validate()?;
                Ok(table)
            }
        }
    }
}

impl From<Table> for TableSource {
    fn from(table: Table) -> Self {
        TableSource::Table(table)
    }
}

impl From<PathBuf> for TableSource {
    fn from(path: PathBuf) -> Self {
        TableSource::Path(path)
    }
}

/// Construction surface of a [`LabelMap`](crate::LabelMap).
///
/// `id_type` stays raw text until construction so that an unsupported kind
/// surfaces as `InvalidConfiguration` from `LabelMap::from_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TableSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,
    #[serde(default = "default_id_type")]
    pub id_type: String,
}

impl Default for LabelMapConfig {
    fn default() -> Self {
        Self {
            source: None,
            label_column: None,
            id_column: None,
            id_type: default_id_type(),
        }
    }
}

impl LabelMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn source(mut self, source: impl Into<TableSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = Some(name.into());
        self
    }

    pub fn id_column(mut self, name: impl Into<String>) -> Self {
        self.id_column = Some(name.into());
        self
    }

    pub fn id_type(mut self, id_type: impl Into<String>) -> Self {
        self.id_type = id_type.into();
        self
    }

    pub fn parsed_id_type(&self) -> Result<IdType> {
        self.id_type.parse()
    }
}
