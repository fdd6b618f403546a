// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # docschema
//!
//! Infers form-oriented schemas from samples of Firestore-style documents.
//!
//! ## Features
//!
//! - **Both Encodings**: REST wire envelopes (`{"stringValue": ...}`) and native documents
//! - **Majority Vote**: One dominant type per field, with deterministic tie-breaks
//! - **Nested Structure**: Maps inferred recursively, arrays get one element schema
//! - **Site Config Rendering**: Schema constants and navigation entries for the admin UI
//! - **Project Files**: Several collections inferred concurrently from one YAML file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docschema::{infer_collection, DocumentFormat};
//! use serde_json::json;
//!
//! let documents = vec![
//!     json!({"name": "Ada", "age": 36}),
//!     json!({"name": "Alan", "age": 41}),
//! ];
//!
//! let collection = infer_collection(&documents, "users", DocumentFormat::Native);
//! println!("{}", collection.to_json_pretty());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   CLI  (infer / project / properties)           │
//! │  read files → spawn_blocking(inference) → render / print        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬──────────────────────┐
//! │    Decode    │          Schema           │        Render        │
//! ├──────────────┼───────────────────────────┼──────────────────────┤
//! │ WireDecoder  │ Counter (frequency tree)  │ buildSchema consts   │
//! │ NativeDecoder│ Synthesis (majority vote) │ navigation array     │
//! │ Batch loading│ Collection assembly       │                      │
//! └──────────────┴───────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Value decoders and document batch loading
pub mod decode;

/// Schema inference engine
pub mod schema;

/// Inference and project configuration
pub mod config;

/// Display names for collections and fields
pub mod naming;

/// Site config rendering
pub mod render;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_project, load_project_from_str, InferenceConfig, ProjectConfig};
pub use decode::{parse_batch, DocumentBatch, InputFormat, NativeValue};
pub use render::render_site_config;
pub use schema::{
    infer_collection, infer_from_list_response, infer_properties, CollectionSchema, Properties,
    SchemaInferrer, SchemaNode,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
