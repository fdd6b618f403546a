//! Configuration types
//!
//! [`InferenceConfig`] carries the engine knobs and is always passed in
//! explicitly. [`ProjectConfig`] is the YAML project file the CLI reads to
//! infer several collections in one run.

use crate::decode::InputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Inference Config
// ============================================================================

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Maximum number of documents to scan (0 = all)
    #[serde(default)]
    pub sample_size: usize,

    /// Attach humanized titles to fields
    #[serde(default = "default_true")]
    pub titles: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 0,
            titles: true,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }

    /// Number of documents to scan out of `available`
    pub fn sample_len(&self, available: usize) -> usize {
        if self.sample_size == 0 {
            available
        } else {
            self.sample_size.min(available)
        }
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the sample size (0 = all documents)
    #[must_use]
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Enable or disable field titles
    #[must_use]
    pub fn titles(mut self, titles: bool) -> Self {
        self.config.titles = titles;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

// ============================================================================
// Project Config
// ============================================================================

/// Project file listing the collections to infer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project display name
    #[serde(default)]
    pub name: Option<String>,

    /// Collections, in navigation order
    #[serde(default)]
    pub collections: Vec<CollectionSource>,

    /// Attach humanized titles to fields
    #[serde(default = "default_true")]
    pub titles: bool,

    /// Directory input paths are resolved against (the project file's directory)
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Where to read one collection's documents from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSource {
    /// Collection identifier (last path segment)
    pub id: String,

    /// Document file, relative to the project file
    pub input: PathBuf,

    /// Encoding of the document file
    #[serde(default)]
    pub format: InputFormat,

    /// Maximum number of documents to scan (0 = all)
    #[serde(default)]
    pub sample: usize,
}

impl ProjectConfig {
    /// Absolute (or base-relative) path of a collection's input file
    pub fn input_path(&self, source: &CollectionSource) -> PathBuf {
        if source.input.is_absolute() {
            source.input.clone()
        } else {
            self.base_dir.join(&source.input)
        }
    }

    /// Inference config for one collection
    pub fn inference_config(&self, source: &CollectionSource) -> InferenceConfig {
        InferenceConfig::builder()
            .sample_size(source.sample)
            .titles(self.titles)
            .build()
    }
}

/// Load a project file
pub fn load_project(path: impl AsRef<Path>) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::config(format!(
                "Failed to read project file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let mut project = load_project_from_str(&content)?;
    project.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(project)
}

/// Load a project from a YAML string. Input paths stay relative.
pub fn load_project_from_str(yaml: &str) -> Result<ProjectConfig> {
    let project: ProjectConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse project YAML: {e}")))?;

    validate_project(&project)?;
    Ok(project)
}

/// Validate a project definition
fn validate_project(project: &ProjectConfig) -> Result<()> {
    if project.collections.is_empty() {
        return Err(Error::missing_field("collections"));
    }

    let mut seen = HashSet::new();
    for source in &project.collections {
        if source.id.trim().is_empty() {
            return Err(Error::config("Collection id cannot be empty"));
        }
        if source.id.contains('/') {
            return Err(Error::config(format!(
                "Collection id '{}' must be a single path segment",
                source.id
            )));
        }
        if source.input.as_os_str().is_empty() {
            return Err(Error::config(format!(
                "Collection '{}' input cannot be empty",
                source.id
            )));
        }
        if !seen.insert(source.id.as_str()) {
            return Err(Error::config(format!(
                "Duplicate collection id: {}",
                source.id
            )));
        }
    }

    Ok(())
}
