//! Schema synthesis
//!
//! Collapses each histogram node into one [`SchemaNode`] by weighted majority.
//!
//! A scalar tag weighs its count. A `map` tag weighs as much as its most
//! strongly evidenced descendant, and an `array` tag as much as the heaviest
//! tag of its element histogram. Structural evidence is the max over children,
//! not the sum.

use super::types::{FieldFrequencyTable, Properties, SchemaNode, TypeFrequency};
use crate::naming::humanize;
use crate::types::ValueType;

/// Weight of one tag at `node`, or `None` if the tag was never observed there
pub fn type_weight(node: &TypeFrequency, value_type: ValueType) -> Option<usize> {
    match value_type {
        ValueType::Map => node.map().map(|fields| {
            fields
                .iter()
                .map(|(_, child)| highest_weight(child))
                .max()
                .unwrap_or(0)
        }),
        ValueType::Array => node.array().map(highest_weight),
        ValueType::Null => None,
        scalar => Some(node.count(scalar)).filter(|count| *count > 0),
    }
}

/// Heaviest weight of any tag at `node` (0 when nothing was observed)
pub fn highest_weight(node: &TypeFrequency) -> usize {
    node.observed_types()
        .filter_map(|value_type| type_weight(node, value_type))
        .max()
        .unwrap_or(0)
}

/// Tag with the strictly greatest weight. Ties keep the earlier tag in
/// [`ValueType::RANKED`]; a node with no observations falls back to `string`.
pub fn dominant_type(node: &TypeFrequency) -> ValueType {
    let mut best: Option<(ValueType, usize)> = None;
    for value_type in node.observed_types() {
        let Some(weight) = type_weight(node, value_type) else {
            continue;
        };
        if best.map_or(true, |(_, best_weight)| weight > best_weight) {
            best = Some((value_type, weight));
        }
    }
    best.map_or(ValueType::FALLBACK, |(value_type, _)| value_type)
}

/// Builds schema trees from frequency tables
#[derive(Debug, Clone)]
pub struct SchemaSynthesizer {
    /// Attach humanized titles to map children
    titles: bool,
}

impl Default for SchemaSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaSynthesizer {
    /// Create a synthesizer that attaches titles
    pub fn new() -> Self {
        Self { titles: true }
    }

    /// Enable/disable field titles
    #[must_use]
    pub fn with_titles(mut self, enabled: bool) -> Self {
        self.titles = enabled;
        self
    }

    /// Synthesize every field of a table, in first-seen order
    pub fn synthesize_fields(&self, table: &FieldFrequencyTable) -> Properties {
        table
            .iter()
            .map(|(key, node)| {
                let mut schema = self.synthesize(node);
                if self.titles {
                    schema.title = Some(humanize(key));
                }
                (key.to_string(), schema)
            })
            .collect()
    }

    /// Synthesize one node and its substructure
    pub fn synthesize(&self, node: &TypeFrequency) -> SchemaNode {
        match dominant_type(node) {
            ValueType::Map => {
                let properties = node
                    .map()
                    .map(|fields| self.synthesize_fields(fields))
                    .unwrap_or_default();
                SchemaNode::map(properties)
            }
            ValueType::Array => {
                let element = node
                    .array()
                    .map_or_else(|| SchemaNode::new(ValueType::FALLBACK), |elements| {
                        self.synthesize(elements)
                    });
                SchemaNode::array(element)
            }
            scalar => SchemaNode::new(scalar),
        }
    }

    /// Synthesize the root of a document batch (always a map)
    pub fn synthesize_root(&self, table: &FieldFrequencyTable) -> SchemaNode {
        SchemaNode::map(self.synthesize_fields(table))
    }
}
