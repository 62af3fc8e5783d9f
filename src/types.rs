use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelMapError;

// ---------------------------------------------------------------------------
// Identifier kind
// ---------------------------------------------------------------------------

/// Numeric kind of every identifier stored in one map. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    #[default]
    Int,
    Float,
}

impl IdType {
    /// Convert a counter value into an identifier of this kind.
    pub fn cast(self, counter: u64) -> LabelId {
        match self {
            IdType::Int => LabelId::Int(counter as i64),
            IdType::Float => LabelId::Float(counter as f64),
        }
    }

    /// Read an identifier of this kind from a table cell.
    ///
    /// `Int` accepts integer text and float text with an integral value
    /// (`"5.0"`); `Float` accepts any float text, integers included.
    pub fn parse_id(self, text: &str) -> Option<LabelId> {
        let text = text.trim();
        match self {
            IdType::Int => {
                if let Ok(v) = text.parse::<i64>() {
                    return Some(LabelId::Int(v));
                }
                let f = text.parse::<f64>().ok()?;
                integral(f).map(LabelId::Int)
            }
            IdType::Float => text.parse::<f64>().ok().map(LabelId::Float),
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdType::Int => f.write_str("int"),
            IdType::Float => f.write_str("float"),
        }
    }
}

impl FromStr for IdType {
    type Err = LabelMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "i64" => Ok(IdType::Int),
            "float" | "f64" | "double" => Ok(IdType::Float),
            other => Err(LabelMapError::InvalidConfiguration(format!(
                "id_type must be int or float, got `{}`",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Identifier value
// ---------------------------------------------------------------------------

/// Numeric stand-in for a label.
///
/// Equality and hashing are numeric rather than structural: `Int(5)` equals
/// `Float(5.0)` and `-0.0` equals `0.0`. NaN compares equal to itself by bit
/// pattern so that it can still key the reverse index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelId {
    Int(i64),
    Float(f64),
}

#[derive(PartialEq, Eq, Hash)]
enum NumericKey {
    Int(i64),
    Bits(u64),
}

/// `Some(i)` when `f` is finite, integral and inside the `i64` range.
fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl LabelId {
    fn key(&self) -> NumericKey {
        match *self {
            LabelId::Int(v) => NumericKey::Int(v),
            LabelId::Float(f) => match integral(f) {
                Some(v) => NumericKey::Int(v),
                None => NumericKey::Bits(f.to_bits()),
            },
        }
    }

    pub fn id_type(&self) -> IdType {
        match self {
            LabelId::Int(_) => IdType::Int,
            LabelId::Float(_) => IdType::Float,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            LabelId::Int(v) => Some(v),
            LabelId::Float(f) => integral(f),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            LabelId::Int(v) => v as f64,
            LabelId::Float(f) => f,
        }
    }
}

impl PartialEq for LabelId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for LabelId {}

impl Hash for LabelId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LabelId::Int(v) => write!(f, "{}", v),
            LabelId::Float(v) if integral(v).is_some() => write!(f, "{:.1}", v),
            LabelId::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for LabelId {
    fn from(v: i64) -> Self {
        LabelId::Int(v)
    }
}

impl From<i32> for LabelId {
    fn from(v: i32) -> Self {
        LabelId::Int(v as i64)
    }
}

impl From<f64> for LabelId {
    fn from(v: f64) -> Self {
        LabelId::Float(v)
    }
}

// ---------------------------------------------------------------------------
// Load result
// ---------------------------------------------------------------------------

/// Result of bulk-loading a table into a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    pub inserted: usize,
    pub skipped: usize,
}
