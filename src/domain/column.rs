//! Column descriptions
//!
//! A [`ColumnSpec`] names a qualifier in the exported column family, the
//! semantic type its raw bytes are decoded with, and the label shown for it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a stored column value
///
/// Parsed case-insensitively from the configuration. Unknown type names are
/// kept as [`ColumnType::Unrecognized`] and decoded as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// UTF-8 text
    String,
    /// Big-endian signed 64-bit integer
    Long,
    /// Big-endian IEEE-754 single precision
    Float,
    /// Big-endian IEEE-754 double precision
    Double,
    /// Any other declared type name
    Unrecognized(String),
}

impl ColumnType {
    /// Type name as written in configuration
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::String => "string",
            ColumnType::Long => "long",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Unrecognized(name) => name,
        }
    }

    /// Whether the type is one of the four known types
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ColumnType::Unrecognized(_))
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "string" => ColumnType::String,
            "long" => ColumnType::Long,
            "float" => ColumnType::Float,
            "double" => ColumnType::Double,
            _ => ColumnType::Unrecognized(value),
        }
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exported column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column qualifier within the exported family
    pub name: String,

    /// Declared semantic type
    pub column_type: ColumnType,

    /// Human readable label
    pub display_label: String,
}

impl ColumnSpec {
    /// Create a column spec labelled with its own name
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        Self {
            display_label: name.clone(),
            name,
            column_type,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = label.into();
        self
    }
}
