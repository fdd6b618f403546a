//! Document batch loading
//!
//! Turns a raw JSON body (a `listDocuments` response, an array of wire
//! documents or an array of plain documents) into a batch the engine can scan.

use crate::error::{Error, Result};
use crate::types::{DocumentFormat, JsonValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Encoding requested for an input body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Detect the encoding from the body shape
    #[default]
    Auto,
    /// Firestore REST envelopes
    Wire,
    /// Plain JSON documents
    Native,
}

/// Wire document as returned by the Firestore REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{path}`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl WireDocument {
    /// Document path relative to the database root
    pub fn path(&self) -> Option<&str> {
        self.name
            .split_once("/documents/")
            .map(|(_, path)| path)
    }

    /// Identifier of the collection the document belongs to
    pub fn collection_id(&self) -> Option<&str> {
        let mut segments = self.path()?.rsplit('/');
        segments.next()?;
        segments.next()
    }
}

/// Body of a `projects.databases.documents.list` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<WireDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ListDocumentsResponse {
    /// Documents as raw wire values, ready for the wire decoder
    pub fn into_values(self) -> Vec<JsonValue> {
        self.documents
            .into_iter()
            .map(|doc| serde_json::json!({ "name": doc.name, "fields": doc.fields }))
            .collect()
    }
}

/// A batch of raw documents with the encoding they are in
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBatch {
    pub format: DocumentFormat,
    pub documents: Vec<JsonValue>,
}

impl DocumentBatch {
    /// Create a batch
    pub fn new(format: DocumentFormat, documents: Vec<JsonValue>) -> Self {
        Self { format, documents }
    }

    /// Number of documents in the batch
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Parse a JSON body into a document batch.
///
/// `source_name` only appears in error messages.
pub fn parse_batch(body: &str, format: InputFormat, source_name: &str) -> Result<DocumentBatch> {
    let value: JsonValue = serde_json::from_str(body)?;
    batch_from_value(value, format, source_name)
}

/// Build a document batch from an already parsed JSON value
pub fn batch_from_value(
    value: JsonValue,
    format: InputFormat,
    source_name: &str,
) -> Result<DocumentBatch> {
    // An empty collection comes back from the REST API as `{}`
    let is_list_response = value.get("documents").is_some()
        || value.as_object().is_some_and(serde_json::Map::is_empty);

    if is_list_response {
        if format == InputFormat::Native {
            return Err(Error::invalid_input(
                source_name,
                "listDocuments responses are always wire encoded",
            ));
        }
        let response: ListDocumentsResponse = serde_json::from_value(value)?;
        debug!(
            source = source_name,
            documents = response.documents.len(),
            "Loaded listDocuments response"
        );
        return Ok(DocumentBatch::new(
            DocumentFormat::Wire,
            response.into_values(),
        ));
    }

    let documents = match value {
        JsonValue::Array(documents) => documents,
        other => {
            return Err(Error::invalid_input(
                source_name,
                format!(
                    "expected a JSON array of documents or a listDocuments response, found {}",
                    json_kind(&other)
                ),
            ))
        }
    };

    if let Some(position) = documents.iter().position(|doc| !doc.is_object()) {
        return Err(Error::invalid_input(
            source_name,
            format!("document at index {position} is not an object"),
        ));
    }

    let format = match format {
        InputFormat::Wire => DocumentFormat::Wire,
        InputFormat::Native => DocumentFormat::Native,
        InputFormat::Auto => detect_format(&documents),
    };

    debug!(
        source = source_name,
        documents = documents.len(),
        format = %format,
        "Loaded document batch"
    );

    Ok(DocumentBatch::new(format, documents))
}

/// Guess the encoding of an array of documents from its first element
pub fn detect_format(documents: &[JsonValue]) -> DocumentFormat {
    match documents.first() {
        Some(first) if first.get("fields").is_some_and(JsonValue::is_object) => {
            DocumentFormat::Wire
        }
        Some(_) => DocumentFormat::Native,
        None => DocumentFormat::Wire,
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
