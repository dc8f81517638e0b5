//! Configuration file support for the optdoc CLI
//!
//! Loads settings from an `optdoc.toml` configuration file.

use anyhow::{Context, Result};
use optdoc_core::MarkdownOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up next to the input file
pub const CONFIG_FILE_NAME: &str = "optdoc.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/optdoc/optdoc/main/crates/optdoc-cli/schema/optdoc.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Markdown syntax extensions
    #[serde(skip_serializing_if = "MarkdownConfig::is_empty")]
    pub markdown: MarkdownConfig,
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
}

/// Markdown syntax extensions (all default to false)
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub-style pipe tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<bool>,
    /// Enable ~~strikethrough~~
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// Enable [^note] footnotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnotes: Option<bool>,
    /// Enable task list items (- [x])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_lists: Option<bool>,
    /// Convert quotes, dashes and ellipses to typographic characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_punctuation: Option<bool>,
}

impl MarkdownConfig {
    fn is_empty(&self) -> bool {
        self.tables.is_none()
            && self.strikethrough.is_none()
            && self.footnotes.is_none()
            && self.task_lists.is_none()
            && self.smart_punctuation.is_none()
    }

    /// Resolve into renderer options, unset switches staying off
    pub fn to_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            tables: self.tables.unwrap_or(false),
            strikethrough: self.strikethrough.unwrap_or(false),
            footnotes: self.footnotes.unwrap_or(false),
            task_lists: self.task_lists.unwrap_or(false),
            smart_punctuation: self.smart_punctuation.unwrap_or(false),
        }
    }
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the output JSON (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
    /// Number of parallel jobs (default: number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.pretty.is_none() && self.jobs.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `optdoc.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with the defaults spelled out, for `init`
    pub fn sample() -> Self {
        Config {
            markdown: MarkdownConfig {
                tables: Some(false),
                strikethrough: Some(false),
                footnotes: Some(false),
                task_lists: Some(false),
                smart_punctuation: Some(false),
            },
            output: OutputConfig {
                pretty: Some(false),
                jobs: None, // one per CPU
            },
        }
    }
}
