//! `svport fetchif`: module interface report.
//!
//! 1. Resolve `svport.toml` (optional)
//! 2. Collect source files from the arguments or `sources.paths`
//! 3. Parse all files in parallel
//! 4. Apply the module filter and print text or JSON

use std::fmt::Write as _;

use serde::Serialize;
use svport_model::Module;

use crate::pipeline::{collect_inputs, parse_all_files, resolve_project, ParsedFile};
use crate::{FetchifArgs, GlobalArgs, ReportFormat};

/// The modules reported for one source file.
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    /// Path of the source file, as given or discovered.
    pub path: String,
    /// Modules that passed the filter.
    pub modules: Vec<&'a Module>,
}

/// Runs the `svport fetchif` command.
///
/// Returns exit code 0 if at least one module was reported, 1 otherwise.
pub fn run(args: &FetchifArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;
    let output = project.as_ref().map(|p| &p.config.output);

    let files = collect_inputs(&args.paths, project.as_ref())?;
    if global.verbose {
        eprintln!("   Parsing {} file(s)", files.len());
    }
    let parsed = parse_all_files(&files)?;

    let filter: Vec<String> = if !args.modules.is_empty() {
        args.modules.clone()
    } else {
        output.map(|o| o.modules.clone()).unwrap_or_default()
    };
    let reports = build_reports(&parsed, &filter);
    let total: usize = reports.iter().map(|r| r.modules.len()).sum();

    let format = args
        .format
        .or_else(|| output.map(|o| o.format.into()))
        .unwrap_or(ReportFormat::Text);
    match format {
        ReportFormat::Text => print!("{}", render_text(&reports)),
        ReportFormat::Json => {
            let pretty = !args.compact && output.map_or(true, |o| o.pretty);
            let json = if pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            println!("{json}");
        }
    }

    if total == 0 {
        if !global.quiet {
            eprintln!("warning: no modules found in {} file(s)", files.len());
        }
        return Ok(1);
    }
    Ok(0)
}

/// Groups parsed modules by file, keeping only those named in `filter`
/// (or all of them when `filter` is empty). Files with no remaining
/// modules are left out.
pub fn build_reports<'a>(parsed: &'a [ParsedFile], filter: &[String]) -> Vec<FileReport<'a>> {
    parsed
        .iter()
        .filter_map(|file| {
            let modules: Vec<&Module> = file
                .modules
                .iter()
                .filter(|m| filter.is_empty() || filter.iter().any(|f| *f == m.name))
                .collect();
            (!modules.is_empty()).then(|| FileReport {
                path: file.path.display().to_string(),
                modules,
            })
        })
        .collect()
}

/// Renders the text report.
pub fn render_text(reports: &[FileReport<'_>]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", report.path);
        for module in &report.modules {
            out.push_str(&render_module(module));
        }
    }
    out
}

/// Renders one module: its parameters, its ports with widths, and the leaf
/// fields of every struct or union port.
pub fn render_module(module: &Module) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {module}");
    for param in &module.parameters {
        let _ = writeln!(out, "    {param}");
    }
    for port in &module.ports {
        let _ = writeln!(out, "    {port} [{}]", width_label(port.width()));
        if port.data_type.is_composite() {
            for (path, leaf) in port.data_type.iter_fields(&port.name) {
                let _ = writeln!(out, "      {path}: {leaf} [{}]", width_label(leaf.width()));
            }
        }
    }
    out
}

/// Formats a bit width, or `?` when it is not statically known.
pub fn width_label(width: Option<u64>) -> String {
    width.map_or_else(|| "?".to_string(), |w| w.to_string())
}
