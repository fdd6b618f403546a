//! Schema inference from document batches
//!
//! Wires the frequency counter and the synthesizer together. Every call builds
//! its own frequency tree and drops it before returning.

use super::counter::build_frequency_table;
use super::synthesis::SchemaSynthesizer;
use super::types::{CollectionSchema, FieldFrequencyTable, Properties};
use crate::config::InferenceConfig;
use crate::decode::{
    DocumentBatch, ListDocumentsResponse, NativeDecoder, NativeValue, ValueDecoder, WireDecoder,
};
use crate::types::{DocumentFormat, JsonValue};
use tracing::debug;

/// Schema inferrer with configuration options
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    config: InferenceConfig,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferrer from a configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Only scan the first `size` documents (0 = all)
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Enable/disable field titles
    #[must_use]
    pub fn with_titles(mut self, enabled: bool) -> Self {
        self.config.titles = enabled;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build the root frequency table with any decoder
    pub fn frequency_table_with<D: ValueDecoder>(
        &self,
        documents: &[D::Value],
        decoder: &D,
    ) -> FieldFrequencyTable {
        let sample = &documents[..self.config.sample_len(documents.len())];
        self.count_sample(sample, documents.len(), decoder)
    }

    /// Infer top-level properties with any decoder
    pub fn infer_with<D: ValueDecoder>(&self, documents: &[D::Value], decoder: &D) -> Properties {
        let table = self.frequency_table_with(documents, decoder);
        self.synthesize(&table)
    }

    /// Infer top-level properties from JSON documents in the given encoding
    pub fn infer_properties(&self, documents: &[JsonValue], format: DocumentFormat) -> Properties {
        match format {
            DocumentFormat::Wire => self.infer_with(documents, &WireDecoder::new()),
            DocumentFormat::Native => {
                let sample = &documents[..self.config.sample_len(documents.len())];
                let natives: Vec<NativeValue> =
                    sample.iter().map(NativeValue::from_document).collect();
                let table =
                    self.count_sample(natives.as_slice(), documents.len(), &NativeDecoder::new());
                self.synthesize(&table)
            }
        }
    }

    /// Infer a collection schema from JSON documents in the given encoding
    pub fn infer_collection(
        &self,
        documents: &[JsonValue],
        collection_id: &str,
        format: DocumentFormat,
    ) -> CollectionSchema {
        let properties = self.infer_properties(documents, format);
        debug!(
            collection = collection_id,
            properties = properties.len(),
            "Inferred collection schema"
        );
        CollectionSchema::new(collection_id, properties)
    }

    /// Infer a collection schema from native documents
    pub fn infer_native_collection(
        &self,
        documents: &[NativeValue],
        collection_id: &str,
    ) -> CollectionSchema {
        CollectionSchema::new(collection_id, self.infer_with(documents, &NativeDecoder::new()))
    }

    /// Count an already sampled prefix of `available` documents
    fn count_sample<D: ValueDecoder>(
        &self,
        sample: &[D::Value],
        available: usize,
        decoder: &D,
    ) -> FieldFrequencyTable {
        let table = build_frequency_table(sample, decoder);
        debug!(
            format = %decoder.format(),
            documents = sample.len(),
            skipped = available - sample.len(),
            fields = table.len(),
            "Built frequency table"
        );
        table
    }

    fn synthesize(&self, table: &FieldFrequencyTable) -> Properties {
        SchemaSynthesizer::new()
            .with_titles(self.config.titles)
            .synthesize_fields(table)
    }

    /// Infer a collection schema from a loaded batch
    pub fn infer_batch(&self, batch: &DocumentBatch, collection_id: &str) -> CollectionSchema {
        self.infer_collection(&batch.documents, collection_id, batch.format)
    }
}

/// Infer top-level properties with default settings (convenience function)
pub fn infer_properties(documents: &[JsonValue], format: DocumentFormat) -> Properties {
    SchemaInferrer::new().infer_properties(documents, format)
}

/// Infer a collection schema with default settings (convenience function)
pub fn infer_collection(
    documents: &[JsonValue],
    collection_id: &str,
    format: DocumentFormat,
) -> CollectionSchema {
    SchemaInferrer::new().infer_collection(documents, collection_id, format)
}

/// Infer a collection schema from a Firestore `listDocuments` response
pub fn infer_from_list_response(
    response: &ListDocumentsResponse,
    collection_id: &str,
) -> CollectionSchema {
    let documents = response.clone().into_values();
    infer_collection(&documents, collection_id, DocumentFormat::Wire)
}
