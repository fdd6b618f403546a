//! Schema types
//!
//! Frequency histograms built while scanning documents, and the schema tree
//! synthesized from them.

use crate::naming::{humanize, pluralize};
use crate::types::ValueType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Frequency histograms
// ============================================================================

/// Histogram of the types observed at one field path.
///
/// Scalar tags carry a count. `map` observations are folded into a nested
/// [`FieldFrequencyTable`] and `array` observations into a single nested
/// histogram shared by every element position. Both are created on the first
/// map/array observation at this node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFrequency {
    counts: BTreeMap<ValueType, usize>,
    map: Option<FieldFrequencyTable>,
    array: Option<Box<TypeFrequency>>,
}

impl TypeFrequency {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one scalar observation. Structural and null tags are not counted here.
    pub fn record(&mut self, value_type: ValueType) {
        if value_type.is_structural() || value_type == ValueType::Null {
            return;
        }
        *self.counts.entry(value_type).or_insert(0) += 1;
    }

    /// Observations of a scalar tag
    pub fn count(&self, value_type: ValueType) -> usize {
        self.counts.get(&value_type).copied().unwrap_or(0)
    }

    /// Child field histograms, if this node was ever observed as a map
    pub fn map(&self) -> Option<&FieldFrequencyTable> {
        self.map.as_ref()
    }

    /// Element histogram, if this node was ever observed as an array
    pub fn array(&self) -> Option<&TypeFrequency> {
        self.array.as_deref()
    }

    /// Child field histograms, created on first use
    pub fn map_or_insert(&mut self) -> &mut FieldFrequencyTable {
        self.map.get_or_insert_with(FieldFrequencyTable::new)
    }

    /// Element histogram, created on first use
    pub fn array_or_insert(&mut self) -> &mut TypeFrequency {
        self.array.get_or_insert_with(Box::default)
    }

    /// Whether the tag was observed at this node
    pub fn contains(&self, value_type: ValueType) -> bool {
        match value_type {
            ValueType::Map => self.map.is_some(),
            ValueType::Array => self.array.is_some(),
            ValueType::Null => false,
            scalar => self.count(scalar) > 0,
        }
    }

    /// Observed tags, in tie-break order
    pub fn observed_types(&self) -> impl Iterator<Item = ValueType> + '_ {
        ValueType::RANKED
            .into_iter()
            .filter(|value_type| self.contains(*value_type))
    }

    /// Whether nothing but nulls was ever observed here
    pub fn is_empty(&self) -> bool {
        self.observed_types().next().is_none()
    }
}

/// Per-field histograms for one nesting level, in first-seen field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFrequencyTable {
    fields: IndexMap<String, TypeFrequency>,
}

impl FieldFrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram for a field, created on first use
    pub fn field_mut(&mut self, name: &str) -> &mut TypeFrequency {
        if !self.fields.contains_key(name) {
            self.fields.insert(name.to_string(), TypeFrequency::new());
        }
        &mut self.fields[name]
    }

    /// Histogram for a field
    pub fn get(&self, name: &str) -> Option<&TypeFrequency> {
        self.fields.get(name)
    }

    /// Fields and their histograms, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeFrequency)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Synthesized schema
// ============================================================================

/// Ordered child schemas of a map node
pub type Properties = IndexMap<String, SchemaNode>;

/// Inferred description of one field or array element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Dominant type
    pub data_type: ValueType,

    /// Display title (map children only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Child fields (for maps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// Element schema (for arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// Create a node of a scalar type
    pub fn new(data_type: ValueType) -> Self {
        Self {
            data_type,
            title: None,
            properties: None,
            of: None,
        }
    }

    /// Create a map node with child fields
    pub fn map(properties: Properties) -> Self {
        Self {
            data_type: ValueType::Map,
            title: None,
            properties: Some(properties),
            of: None,
        }
    }

    /// Create an array node with an element schema
    pub fn array(of: SchemaNode) -> Self {
        Self {
            data_type: ValueType::Array,
            title: None,
            properties: None,
            of: Some(Box::new(of)),
        }
    }

    /// Set the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Child field schema
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref()?.get(name)
    }

    /// Element schema
    pub fn element(&self) -> Option<&SchemaNode> {
        self.of.as_deref()
    }

    /// Nesting depth of this node (1 for a scalar)
    pub fn depth(&self) -> usize {
        let children = self
            .properties
            .iter()
            .flat_map(|props| props.values())
            .chain(self.of.as_deref())
            .map(SchemaNode::depth)
            .max()
            .unwrap_or(0);
        children + 1
    }
}

/// Schema of the documents in one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    /// Singular display name
    pub name: String,
    /// Top-level fields
    pub properties: Properties,
}

/// Inferred collection: display label, path and document schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    /// Plural display name
    pub name: String,
    /// Collection identifier the documents were read from
    pub relative_path: String,
    pub schema: EntitySchema,
}

impl CollectionSchema {
    /// Package inferred properties under names derived from the collection identifier
    pub fn new(collection_id: &str, properties: Properties) -> Self {
        let name = humanize(collection_id);
        Self {
            name: pluralize(&name),
            relative_path: collection_id.to_string(),
            schema: EntitySchema { name, properties },
        }
    }

    /// Root schema node (always a map)
    pub fn root(&self) -> SchemaNode {
        SchemaNode::map(self.schema.properties.clone())
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
