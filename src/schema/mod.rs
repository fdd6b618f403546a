//! Schema inference module
//!
//! Derives a form-oriented schema from a sample of documents.
//!
//! # Features
//!
//! - **Type Counting**: Per-field histograms of observed value types
//! - **Majority Vote**: One dominant type per field, deterministic tie-breaks
//! - **Nested Maps**: Child fields inferred recursively
//! - **Typed Arrays**: One element schema shared by all array slots
//! - **Both Encodings**: Wire envelopes and native values give identical schemas

mod counter;
mod inference;
mod synthesis;
mod types;

pub use counter::{build_frequency_table, observe_field, observe_value};
pub use inference::{infer_collection, infer_from_list_response, infer_properties, SchemaInferrer};
pub use synthesis::{dominant_type, highest_weight, type_weight, SchemaSynthesizer};
pub use types::{
    CollectionSchema, EntitySchema, FieldFrequencyTable, Properties, SchemaNode, TypeFrequency,
};
