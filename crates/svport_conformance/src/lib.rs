//! Conformance test helpers for the svport interface extractor.
//!
//! Provides shared functions that run source text or fixture files through
//! the extractor and return structured results for assertion in integration
//! tests.

#![warn(missing_docs)]

use std::path::PathBuf;

use svport_config::SvportConfig;
use svport_model::{DataType, Module};
use svport_parser::{SvParser, TypeRegistry};

/// Result of extracting one source.
pub struct ExtractResult {
    /// Modules in source order.
    pub modules: Vec<Module>,
    /// Types registered while extracting.
    pub registry: TypeRegistry,
}

impl ExtractResult {
    /// Returns the module called `name`, panicking with the available names
    /// if it is missing.
    pub fn module(&self, name: &str) -> &Module {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("no module `{name}` in {:?}", self.module_names()))
    }

    /// Returns the module names in source order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Returns the registered type called `name`, panicking if it is missing.
    pub fn registered(&self, name: &str) -> &DataType {
        self.registry
            .get(name)
            .unwrap_or_else(|| panic!("type `{name}` is not registered"))
    }
}

/// Extracts all modules from `source` with a fresh parser.
pub fn extract(source: &str) -> ExtractResult {
    let mut parser = SvParser::new();
    let modules = parser.parse_text(source);
    ExtractResult {
        modules,
        registry: parser.registry().clone(),
    }
}

/// Returns the path of a file in `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Extracts all modules from a fixture file.
pub fn extract_fixture(name: &str) -> ExtractResult {
    let mut parser = SvParser::new();
    let modules = parser
        .parse_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"));
    ExtractResult {
        modules,
        registry: parser.registry().clone(),
    }
}

/// Lists `(path, width)` for every leaf of `data_type`, prefixed by `prefix`.
pub fn leaf_widths(data_type: &DataType, prefix: &str) -> Vec<(String, Option<u64>)> {
    data_type
        .iter_fields(prefix)
        .map(|(path, leaf)| (path, leaf.width()))
        .collect()
}

/// Creates a minimal `SvportConfig` scanning the given source paths.
pub fn make_config(paths: &[&str]) -> SvportConfig {
    let list: Vec<String> = paths.iter().map(|p| format!("\"{p}\"")).collect();
    let toml_str = format!(
        r#"
[project]
name = "conformance_test"

[sources]
paths = [{}]
"#,
        list.join(", ")
    );
    svport_config::load_config_from_str(&toml_str)
        .unwrap_or_else(|e| panic!("invalid conformance config: {e}"))
}
