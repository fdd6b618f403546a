//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_project, InferenceConfig, ProjectConfig};
use crate::decode::{parse_batch, DocumentBatch, InputFormat};
use crate::error::{Error, Result, ResultExt};
use crate::render::render_site_config;
use crate::schema::{CollectionSchema, SchemaInferrer, SchemaNode};
use futures::future::try_join_all;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                collection,
                input,
                format,
                sample,
                no_titles,
                output,
            } => {
                let config = InferenceConfig::builder()
                    .sample_size(*sample)
                    .titles(!*no_titles)
                    .build();
                self.infer(collection, input, *format, config, *output).await
            }
            Commands::Project { config, out } => self.project(config, out.as_deref()).await,
            Commands::Properties { input, format } => self.properties(input, *format).await,
        }
    }

    /// Infer one collection and print its schema
    async fn infer(
        &self,
        collection_id: &str,
        input: &Path,
        format: InputFormat,
        config: InferenceConfig,
        output: OutputFormat,
    ) -> Result<()> {
        let batch = read_batch(input, format).await?;
        let collection = infer_blocking(SchemaInferrer::with_config(config), batch, collection_id)
            .await?;

        match output {
            OutputFormat::Json => println!("{}", serde_json::to_string(&collection)?),
            OutputFormat::Pretty => print!("{}", format_tree(&collection)),
        }
        Ok(())
    }

    /// Infer every collection of a project and emit the site config
    async fn project(&self, config_path: &Path, out: Option<&Path>) -> Result<()> {
        let started = Instant::now();
        let project = load_project(config_path)?;
        info!(
            project = project.name.as_deref().unwrap_or("unnamed"),
            collections = project.collections.len(),
            "Inferring project"
        );

        let collections = infer_project(&project).await?;
        let rendered = render_site_config(&collections)?;

        match out {
            Some(path) => {
                tokio::fs::write(path, &rendered)
                    .await
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                info!(
                    path = %path.display(),
                    collections = collections.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Wrote site config"
                );
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }

    /// Print only the inferred properties
    async fn properties(&self, input: &Path, format: InputFormat) -> Result<()> {
        let batch = read_batch(input, format).await?;
        let inferrer = SchemaInferrer::new();
        let properties = tokio::task::spawn_blocking(move || {
            inferrer.infer_properties(&batch.documents, batch.format)
        })
        .await?;

        println!("{}", serde_json::to_string_pretty(&properties)?);
        Ok(())
    }
}

/// Read and parse a document file
pub async fn read_batch(path: &Path, format: InputFormat) -> Result<DocumentBatch> {
    let body = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;

    let source_name = path.display().to_string();
    parse_batch(&body, format, &source_name)
        .with_context(|| format!("Failed to load documents from '{source_name}'"))
}

/// Run one inference off the async runtime
async fn infer_blocking(
    inferrer: SchemaInferrer,
    batch: DocumentBatch,
    collection_id: &str,
) -> Result<CollectionSchema> {
    let collection_id = collection_id.to_string();
    let collection =
        tokio::task::spawn_blocking(move || inferrer.infer_batch(&batch, &collection_id)).await?;
    Ok(collection)
}

/// Infer every collection of a project concurrently, in project order
pub async fn infer_project(project: &ProjectConfig) -> Result<Vec<CollectionSchema>> {
    let tasks = project.collections.iter().map(|source| {
        let path = project.input_path(source);
        let inferrer = SchemaInferrer::with_config(project.inference_config(source));
        async move {
            let batch = read_batch(&path, source.format).await?;
            debug!(
                collection = %source.id,
                documents = batch.len(),
                format = %batch.format,
                "Loaded collection"
            );
            infer_blocking(inferrer, batch, &source.id).await
        }
    });

    try_join_all(tasks).await
}

/// Human-readable schema tree
pub fn format_tree(collection: &CollectionSchema) -> String {
    let mut out = format!("{} ({})\n", collection.name, collection.relative_path);
    for (key, node) in &collection.schema.properties {
        write_node(&mut out, key, node, 1);
    }
    out
}

fn write_node(out: &mut String, key: &str, node: &SchemaNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{key}: {}", node.data_type);

    // Arrays of arrays collapse onto one line; the innermost element decides the fields
    let mut innermost = node;
    while let Some(element) = innermost.element() {
        let _ = write!(out, " of {}", element.data_type);
        innermost = element;
    }
    if let Some(title) = &node.title {
        let _ = write!(out, " \"{title}\"");
    }
    out.push('\n');

    if let Some(fields) = &innermost.properties {
        for (child_key, child) in fields {
            write_node(out, child_key, child, depth + 1);
        }
    }
}
