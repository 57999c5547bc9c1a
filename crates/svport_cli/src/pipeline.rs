//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps used by both `fetchif` and `types`: configuration
//! lookup, source file discovery, and the parallel parse-all-files step.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use svport_config::{SourcesConfig, SvportConfig};
use svport_model::Module;
use svport_parser::{SvParser, TypeRegistry};

use crate::GlobalArgs;

/// A loaded configuration and the directory its relative paths are based on.
pub struct Project {
    /// Directory containing the configuration file.
    pub root: PathBuf,
    /// The parsed configuration.
    pub config: SvportConfig,
}

/// The extraction results for one source file.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path of the source file.
    pub path: PathBuf,
    /// Modules found in the file, in source order.
    pub modules: Vec<Module>,
    /// Struct and union types registered while parsing the file.
    pub registry: TypeRegistry,
}

/// Resolves the project configuration from global CLI args.
///
/// If `--config` is given it must exist: a file is loaded directly and a
/// directory is searched for `svport.toml`. Otherwise the current directory
/// and its parents are searched, and running without any configuration is
/// allowed.
pub fn resolve_project(global: &GlobalArgs) -> Result<Option<Project>, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            let content = std::fs::read_to_string(&p)?;
            let config = svport_config::load_config_from_str(&content)?;
            let root = p
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            return Ok(Some(Project { root, config }));
        }
        let config = svport_config::load_config(&p)?;
        return Ok(Some(Project { root: p, config }));
    }

    match svport_config::find_config(&std::env::current_dir()?) {
        Some(root) => {
            log::debug!("using configuration in {}", root.display());
            let config = svport_config::load_config(&root)?;
            Ok(Some(Project { root, config }))
        }
        None => Ok(None),
    }
}

/// Expands command-line paths (or the configured ones) into a sorted list of
/// source files.
///
/// Directories are walked recursively for the configured extensions; files
/// named explicitly are always included. Missing paths are an error.
pub fn collect_inputs(
    paths: &[String],
    project: Option<&Project>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let default_sources = SourcesConfig::default();
    let sources = project.map_or(&default_sources, |p| &p.config.sources);

    let roots: Vec<PathBuf> = if !paths.is_empty() {
        paths.iter().map(PathBuf::from).collect()
    } else if let Some(project) = project.filter(|p| !p.config.sources.paths.is_empty()) {
        project
            .config
            .sources
            .paths
            .iter()
            .map(|p| project.root.join(p))
            .collect()
    } else {
        return Err("no input paths given and no sources.paths configured".into());
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_dir() {
            files.extend(discover_source_files(&root, sources)?);
        } else if root.is_file() {
            files.push(root);
        } else {
            return Err(format!("path not found: {}", root.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Discovers source files in the given directory (recursive), sorted by path.
pub fn discover_source_files(
    dir: &Path,
    sources: &SourcesConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    walk_dir(dir, sources, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    sources: &SourcesConfig,
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, sources, files)?;
        } else if is_source_file(&path, sources) {
            files.push(path);
        }
    }
    Ok(())
}

/// Returns `true` if `path` has one of the configured source extensions.
pub fn is_source_file(path: &Path, sources: &SourcesConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| sources.matches_extension(ext))
}

/// Parses every file in parallel, one [`SvParser`] per file.
///
/// Results come back in the order of `files`. The first unreadable file
/// fails the whole step.
pub fn parse_all_files(files: &[PathBuf]) -> Result<Vec<ParsedFile>, Box<dyn std::error::Error>> {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let mut parser = SvParser::new();
            parser.parse_file(path).map(|modules| ParsedFile {
                path: path.clone(),
                modules,
                registry: parser.registry().clone(),
            })
        })
        .collect();

    let mut parsed = Vec::with_capacity(results.len());
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(file) => {
                log::debug!(
                    "{}: {} modules, {} types",
                    path.display(),
                    file.modules.len(),
                    file.registry.len()
                );
                parsed.push(file);
            }
            Err(e) => return Err(format!("failed to read {}: {e}", path.display()).into()),
        }
    }
    Ok(parsed)
}
