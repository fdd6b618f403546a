// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! docschema CLI
//!
//! Command-line interface for inferring collection schemas

use clap::Parser;
use docschema::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only schemas and rendered output
    let level: tracing::Level = cli.level().into();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
