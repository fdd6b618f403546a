//! Type-frequency counting
//!
//! Folds documents into [`FieldFrequencyTable`] trees. Recursion depth follows
//! document nesting depth.

use super::types::{FieldFrequencyTable, TypeFrequency};
use crate::decode::ValueDecoder;
use crate::types::ValueType;

/// Classify `value` and fold it into the histogram of `field_name`
pub fn observe_field<D: ValueDecoder>(
    table: &mut FieldFrequencyTable,
    field_name: &str,
    value: &D::Value,
    decoder: &D,
) {
    let value_type = decoder.classify(value);
    let node = table.field_mut(field_name);
    observe_value(node, value_type, value, decoder);
}

/// Fold an already classified value into `node`
pub fn observe_value<D: ValueDecoder>(
    node: &mut TypeFrequency,
    value_type: ValueType,
    value: &D::Value,
    decoder: &D,
) {
    match value_type {
        ValueType::Map => {
            let fields = node.map_or_insert();
            for (key, child) in decoder.map_entries(value) {
                observe_field(fields, key, child, decoder);
            }
        }
        ValueType::Array => {
            let elements = node.array_or_insert();
            for element in decoder.array_elements(value) {
                let element_type = decoder.classify(element);
                observe_value(elements, element_type, element, decoder);
            }
        }
        // Classification only, no accumulator slot
        ValueType::Null => {}
        scalar => node.record(scalar),
    }
}

/// Build the root frequency table for a batch of documents
pub fn build_frequency_table<D: ValueDecoder>(
    documents: &[D::Value],
    decoder: &D,
) -> FieldFrequencyTable {
    let mut table = FieldFrequencyTable::new();
    for document in documents {
        for (key, value) in decoder.document_fields(document) {
            observe_field(&mut table, key, value, decoder);
        }
    }
    table
}
