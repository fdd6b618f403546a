//! Decoder types and traits
//!
//! Defines the value-decoding abstraction shared by both document encodings
//! and the typed native value model.

use crate::types::{DocumentFormat, ValueType};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Iterator over the `(key, value)` pairs of a map value
pub type Entries<'a, V> = Box<dyn Iterator<Item = (&'a str, &'a V)> + 'a>;

/// Strategy for reading values of one document encoding.
///
/// The frequency counter only talks to this trait, so counting and synthesis
/// never branch on the encoding themselves.
pub trait ValueDecoder {
    /// Raw value representation of this encoding
    type Value;

    /// Encoding handled by this decoder
    fn format(&self) -> DocumentFormat;

    /// Resolve a value to exactly one type tag. Never fails.
    fn classify(&self, value: &Self::Value) -> ValueType;

    /// Fields of a map value. Empty when the value carries no fields.
    fn map_entries<'a>(&self, value: &'a Self::Value) -> Entries<'a, Self::Value>;

    /// Elements of an array value. Empty when the value carries no elements.
    fn array_elements<'a>(&self, value: &'a Self::Value) -> &'a [Self::Value];

    /// Top-level fields of a document
    fn document_fields<'a>(&self, document: &'a Self::Value) -> Entries<'a, Self::Value>;
}

// ============================================================================
// Native values
// ============================================================================

/// Geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reference to another document, by slash-separated path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub path: String,
}

impl DocumentReference {
    /// Create a reference from a document path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Build a reference from path segments
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let path = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self { path }
    }

    /// Collection the referenced document lives in
    pub fn collection_id(&self) -> Option<&str> {
        let mut segments = self.path.rsplit('/');
        segments.next()?;
        segments.next()
    }
}

/// In-memory document value with typed wrappers for the Firestore-specific kinds
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<NativeValue>),
    Map(IndexMap<String, NativeValue>),
    Timestamp(DateTime<Utc>),
    GeoPoint(GeoPoint),
    Reference(DocumentReference),
}

impl NativeValue {
    /// Build a map value from key/value pairs, keeping their order
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, NativeValue)>) -> Self {
        NativeValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Fields of a map value
    pub fn as_map(&self) -> Option<&IndexMap<String, NativeValue>> {
        match self {
            NativeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Elements of an array value
    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::String(s)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Boolean(b)
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Integer(n)
    }
}

impl From<f64> for NativeValue {
    fn from(n: f64) -> Self {
        NativeValue::Double(n)
    }
}

impl<T: Into<NativeValue>> From<Vec<T>> for NativeValue {
    fn from(values: Vec<T>) -> Self {
        NativeValue::Array(values.into_iter().map(Into::into).collect())
    }
}
