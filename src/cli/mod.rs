//! CLI module
//!
//! Command-line interface for inferring collection schemas.
//!
//! # Commands
//!
//! - `infer` - Infer one collection from a document file
//! - `project` - Infer every collection of a project file and render the site config
//! - `properties` - Print only the inferred properties of a document file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{format_tree, infer_project, read_batch, Runner};
