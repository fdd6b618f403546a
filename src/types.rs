//! Common types used throughout docschema
//!
//! This module contains the value type tag set, the document encodings the
//! engine understands, and a few shared aliases.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Value Type
// ============================================================================

/// Type tag assigned to a single field value.
///
/// Variant order is the tie-break order used when two types are backed by the
/// same amount of evidence, so `Ord` is derived from declaration order.
/// `Null` sorts last and never carries weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Map,
    Array,
    Timestamp,
    Geopoint,
    Reference,
    Null,
}

impl ValueType {
    /// Every tag that can win a dominance vote, in tie-break order
    pub const RANKED: [ValueType; 8] = [
        ValueType::Number,
        ValueType::String,
        ValueType::Boolean,
        ValueType::Map,
        ValueType::Array,
        ValueType::Timestamp,
        ValueType::Geopoint,
        ValueType::Reference,
    ];

    /// Type used when a field has no evidence at all
    pub const FALLBACK: ValueType = ValueType::String;

    /// Lowercase tag name
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Map => "map",
            ValueType::Array => "array",
            ValueType::Timestamp => "timestamp",
            ValueType::Geopoint => "geopoint",
            ValueType::Reference => "reference",
            ValueType::Null => "null",
        }
    }

    /// Whether values of this type carry nested structure
    pub fn is_structural(self) -> bool {
        matches!(self, ValueType::Map | ValueType::Array)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Document Format
// ============================================================================

/// Encoding of the documents handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Firestore REST encoding: every value wrapped in a `{"<kind>Value": ...}` envelope
    #[default]
    Wire,
    /// Plain values, with typed wrappers for timestamps, geopoints and references
    Native,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Wire => write!(f, "wire"),
            DocumentFormat::Native => write!(f, "native"),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
