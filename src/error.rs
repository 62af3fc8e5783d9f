use thiserror::Error;

use crate::types::{IdType, LabelId};

#[derive(Error, Debug)]
pub enum LabelMapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Label not found: {0}")]
    LabelNotFound(String),

    #[error("Id not found: {0}")]
    IdNotFound(LabelId),

    #[error("Row {row}: cannot read `{value}` in column `{column}` as {id_type} id")]
    InvalidId {
        row: usize,
        column: String,
        value: String,
        id_type: IdType,
    },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LabelMapError {
    /// True for both lookup directions (`LabelNotFound`, `IdNotFound`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LabelNotFound(_) | Self::IdNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, LabelMapError>;
