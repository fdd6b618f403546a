//! Site config rendering
//!
//! Serializes inferred collections into the TypeScript module a generated
//! data-management site imports: one `buildSchema(...)` constant per
//! collection followed by the `navigation` array that registers them.

use crate::error::Result;
use crate::naming::variable_name;
use crate::schema::CollectionSchema;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::HashSet;
use tracing::debug;

const HEADER: &str = r#"import React from "react";

import {
	Entity,
	EntityCollectionView,
	EnumValues,
	buildSchema
} from "@camberi/firecms";
"#;

/// Render the site config module for `collections`, in the given order
pub fn render_site_config(collections: &[CollectionSchema]) -> Result<String> {
    let variables = schema_variables(collections);

    let mut out = String::from(HEADER);

    for (collection, variable) in collections.iter().zip(&variables) {
        out.push('\n');
        out.push_str(&format!(
            "const {variable} = buildSchema({});\n",
            to_tab_json(&collection.schema)?
        ));
    }

    out.push_str("\nexport const navigation: EntityCollectionView<any>[] = [\n");
    for (collection, variable) in collections.iter().zip(&variables) {
        out.push_str("\t{\n");
        out.push_str(&format!(
            "\t\trelativePath: {},\n",
            to_tab_json(&collection.relative_path)?
        ));
        out.push_str(&format!("\t\tschema: {variable},\n"));
        out.push_str(&format!("\t\tname: {},\n", to_tab_json(&collection.name)?));
        out.push_str("\t},\n");
    }
    out.push_str("];\n");

    debug!(
        collections = collections.len(),
        bytes = out.len(),
        "Rendered site config"
    );
    Ok(out)
}

/// Unique `<name>Schema` identifiers, one per collection
fn schema_variables(collections: &[CollectionSchema]) -> Vec<String> {
    let mut taken = HashSet::new();
    collections
        .iter()
        .map(|collection| {
            let base = format!("{}Schema", variable_name(&collection.relative_path));
            let mut candidate = base.clone();
            let mut n = 2;
            while !taken.insert(candidate.clone()) {
                candidate = format!("{base}{n}");
                n += 1;
            }
            candidate
        })
        .collect()
}

/// JSON with tab indentation
fn to_tab_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
