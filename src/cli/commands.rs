//! CLI commands and argument parsing

use crate::decode::InputFormat;
use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Document schema inference CLI
#[derive(Parser, Debug)]
#[command(name = "docschema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level for the subscriber
    pub fn level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => LogLevel::Info,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the schema of one collection
    Infer {
        /// Collection identifier (used for names and relativePath)
        #[arg(long)]
        collection: String,

        /// Document file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Document encoding
        #[arg(short, long, default_value = "auto")]
        format: InputFormat,

        /// Only scan the first N documents (0 = all)
        #[arg(long, default_value = "0")]
        sample: usize,

        /// Omit humanized field titles
        #[arg(long)]
        no_titles: bool,

        /// Output format
        #[arg(short, long, default_value = "json")]
        output: OutputFormat,
    },

    /// Infer every collection of a project file and render the site config
    Project {
        /// Project file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Write the site config here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print only the inferred properties of a document file
    Properties {
        /// Document file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Document encoding
        #[arg(short, long, default_value = "auto")]
        format: InputFormat,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (single line)
    Json,
    /// Human-readable schema tree
    Pretty,
}
