//! Configuration types deserialized from `svport.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `svport.toml`.
#[derive(Debug, Deserialize)]
pub struct SvportConfig {
    /// Project metadata.
    pub project: ProjectMeta,
    /// Where to look for SystemVerilog sources.
    #[serde(default)]
    pub sources: SourcesConfig,
    /// How extracted interfaces are reported.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project metadata required in every `svport.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
}

/// Source discovery settings.
#[derive(Debug, Deserialize)]
pub struct SourcesConfig {
    /// Files or directories to scan, relative to the project directory.
    #[serde(default)]
    pub paths: Vec<String>,
    /// File extensions (without the leading dot) picked up from directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl SourcesConfig {
    /// Returns `true` if a file extension is one of the configured ones.
    ///
    /// Matching is case-insensitive.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn default_extensions() -> Vec<String> {
    ["sv", "svh", "v"].iter().map(|s| s.to_string()).collect()
}

/// Report settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Only report modules with these names. Empty means all modules.
    #[serde(default)]
    pub modules: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
            modules: Vec::new(),
        }
    }
}

impl OutputConfig {
    /// Returns `true` if `module` passes the module filter.
    pub fn selects(&self, module: &str) -> bool {
        self.modules.is_empty() || self.modules.iter().any(|m| m == module)
    }
}

fn default_pretty() -> bool {
    true
}

/// Report format.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// JSON produced from the serde model.
    Json,
}
