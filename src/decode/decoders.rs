//! Decoder implementations
//!
//! One decoder per document encoding, plus the lifting of plain JSON into
//! native values.

use super::types::{DocumentReference, Entries, GeoPoint, NativeValue, ValueDecoder};
use crate::types::{DocumentFormat, JsonObject, JsonValue, ValueType};
use chrono::{DateTime, Utc};
use tracing::trace;

// ============================================================================
// Wire Decoder
// ============================================================================

/// Envelope keys in classification precedence order
const WIRE_ENVELOPES: [(&str, ValueType); 10] = [
    ("bytesValue", ValueType::Number),
    ("doubleValue", ValueType::Number),
    ("integerValue", ValueType::Number),
    ("stringValue", ValueType::String),
    ("booleanValue", ValueType::Boolean),
    ("arrayValue", ValueType::Array),
    ("timestampValue", ValueType::Timestamp),
    ("geoPointValue", ValueType::Geopoint),
    ("referenceValue", ValueType::Reference),
    ("mapValue", ValueType::Map),
];

/// Decoder for the Firestore REST encoding, where every value is wrapped in a
/// single-key envelope such as `{"stringValue": "abc"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct WireDecoder;

impl WireDecoder {
    /// Create a new wire decoder
    pub fn new() -> Self {
        Self
    }
}

impl ValueDecoder for WireDecoder {
    type Value = JsonValue;

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Wire
    }

    fn classify(&self, value: &JsonValue) -> ValueType {
        let Some(envelope) = value.as_object() else {
            trace!(value = %value, "Wire value is not an envelope, classifying as null");
            return ValueType::Null;
        };

        let tag = WIRE_ENVELOPES
            .iter()
            .find(|(key, _)| envelope.get(*key).is_some_and(|payload| !payload.is_null()))
            .map(|(_, tag)| *tag);

        tag.unwrap_or_else(|| {
            trace!(value = %value, "No recognized envelope key, classifying as null");
            ValueType::Null
        })
    }

    fn map_entries<'a>(&self, value: &'a JsonValue) -> Entries<'a, JsonValue> {
        match value
            .get("mapValue")
            .and_then(|m| m.get("fields"))
            .and_then(JsonValue::as_object)
        {
            Some(fields) => Box::new(fields.iter().map(|(k, v)| (k.as_str(), v))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn array_elements<'a>(&self, value: &'a JsonValue) -> &'a [JsonValue] {
        value
            .get("arrayValue")
            .and_then(|a| a.get("values"))
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn document_fields<'a>(&self, document: &'a JsonValue) -> Entries<'a, JsonValue> {
        match document.get("fields").and_then(JsonValue::as_object) {
            Some(fields) => Box::new(fields.iter().map(|(k, v)| (k.as_str(), v))),
            None => Box::new(std::iter::empty()),
        }
    }
}

// ============================================================================
// Native Decoder
// ============================================================================

/// Decoder for [`NativeValue`] documents
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDecoder;

impl NativeDecoder {
    /// Create a new native decoder
    pub fn new() -> Self {
        Self
    }
}

impl ValueDecoder for NativeDecoder {
    type Value = NativeValue;

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Native
    }

    fn classify(&self, value: &NativeValue) -> ValueType {
        match value {
            NativeValue::Integer(_) | NativeValue::Double(_) => ValueType::Number,
            NativeValue::String(_) => ValueType::String,
            NativeValue::Boolean(_) => ValueType::Boolean,
            NativeValue::Array(_) => ValueType::Array,
            NativeValue::Timestamp(_) => ValueType::Timestamp,
            NativeValue::GeoPoint(_) => ValueType::Geopoint,
            NativeValue::Reference(_) => ValueType::Reference,
            NativeValue::Map(_) => ValueType::Map,
            NativeValue::Null => ValueType::Null,
        }
    }

    fn map_entries<'a>(&self, value: &'a NativeValue) -> Entries<'a, NativeValue> {
        match value.as_map() {
            Some(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn array_elements<'a>(&self, value: &'a NativeValue) -> &'a [NativeValue] {
        value.as_array().unwrap_or(&[])
    }

    fn document_fields<'a>(&self, document: &'a NativeValue) -> Entries<'a, NativeValue> {
        self.map_entries(document)
    }
}

// ============================================================================
// JSON → native lifting
// ============================================================================

impl NativeValue {
    /// Lift a whole document. The root is always a map, even when its own
    /// keys happen to look like a wrapper shape.
    pub fn from_document(document: &JsonValue) -> Self {
        match document.as_object() {
            Some(fields) => NativeValue::map(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), NativeValue::from(v))),
            ),
            None => NativeValue::from(document),
        }
    }
}

impl From<&JsonValue> for NativeValue {
    /// Lift plain JSON into native values, recognizing the exact shapes the
    /// Admin SDK serializes its `Timestamp`, `GeoPoint` and `DocumentReference`
    /// objects to. Objects with any other key stay maps.
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => NativeValue::Null,
            JsonValue::Bool(b) => NativeValue::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => NativeValue::Integer(i),
                None => NativeValue::Double(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => NativeValue::String(s.clone()),
            JsonValue::Array(values) => {
                NativeValue::Array(values.iter().map(NativeValue::from).collect())
            }
            JsonValue::Object(fields) => {
                if let Some(ts) = parse_timestamp_wrapper(fields) {
                    NativeValue::Timestamp(ts)
                } else if let Some(point) = parse_geopoint_wrapper(fields) {
                    NativeValue::GeoPoint(point)
                } else if let Some(reference) = parse_reference_wrapper(fields) {
                    NativeValue::Reference(reference)
                } else {
                    NativeValue::map(fields.iter().map(|(k, v)| (k.clone(), NativeValue::from(v))))
                }
            }
        }
    }
}

impl From<JsonValue> for NativeValue {
    fn from(value: JsonValue) -> Self {
        NativeValue::from(&value)
    }
}

/// Keys that may sit next to `_path` in a serialized reference
const REFERENCE_KEYS: [&str; 3] = ["_path", "_firestore", "_converter"];

/// Whether the object has exactly the keys in `expected`
fn has_exact_keys(fields: &JsonObject, expected: &[&str]) -> bool {
    fields.len() == expected.len() && expected.iter().all(|key| fields.contains_key(*key))
}

/// `{"_seconds": 1700000000, "_nanoseconds": 0}`
fn parse_timestamp_wrapper(fields: &JsonObject) -> Option<DateTime<Utc>> {
    if !has_exact_keys(fields, &["_seconds", "_nanoseconds"]) {
        return None;
    }
    let seconds = fields.get("_seconds")?.as_i64()?;
    let nanos = fields.get("_nanoseconds")?.as_u64()?;
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

/// `{"_latitude": 51.5, "_longitude": -0.12}`
fn parse_geopoint_wrapper(fields: &JsonObject) -> Option<GeoPoint> {
    if !has_exact_keys(fields, &["_latitude", "_longitude"]) {
        return None;
    }
    Some(GeoPoint {
        latitude: fields.get("_latitude")?.as_f64()?,
        longitude: fields.get("_longitude")?.as_f64()?,
    })
}

/// `{"_path": {"segments": ["users", "alice"]}}`, optionally with
/// `_firestore` and `_converter`
fn parse_reference_wrapper(fields: &JsonObject) -> Option<DocumentReference> {
    if fields.keys().any(|key| !REFERENCE_KEYS.contains(&key.as_str())) {
        return None;
    }
    let segments = fields.get("_path")?.get("segments")?.as_array()?;
    let segments = segments
        .iter()
        .map(JsonValue::as_str)
        .collect::<Option<Vec<_>>>()?;
    Some(DocumentReference::from_segments(segments.as_slice()))
}
