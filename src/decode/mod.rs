//! Document decoding module
//!
//! Supports: Firestore REST wire envelopes, native in-memory values
//!
//! # Overview
//!
//! Each encoding implements [`ValueDecoder`], which classifies a value into a
//! [`ValueType`](crate::types::ValueType) and exposes the children of map and
//! array values. The schema engine is written against the trait only.

mod decoders;
mod input;
mod types;

pub use decoders::{NativeDecoder, WireDecoder};
pub use input::{
    batch_from_value, detect_format, parse_batch, DocumentBatch, InputFormat,
    ListDocumentsResponse, WireDocument,
};
pub use types::{DocumentReference, Entries, GeoPoint, NativeValue, ValueDecoder};

#[cfg(test)]
mod tests;
