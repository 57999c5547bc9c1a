//! `svport types`: lists the struct and union types found in each file.

use std::fmt::Write as _;

use serde::Serialize;
use svport_model::DataType;
use svport_parser::TypeRegistry;

use crate::fetchif::width_label;
use crate::pipeline::{collect_inputs, parse_all_files, resolve_project};
use crate::{GlobalArgs, ReportFormat, TypesArgs};

/// Registered types of one source file.
#[derive(Debug, Serialize)]
pub struct TypesReport {
    /// Path of the source file.
    pub path: String,
    /// Types in name order.
    pub types: Vec<TypeEntry>,
}

/// One registry entry.
#[derive(Debug, Serialize)]
pub struct TypeEntry {
    /// Registered name.
    pub name: String,
    /// `struct`, `union` or `basic`.
    pub kind: &'static str,
    /// For `parameter type` aliases, the name of the aliased type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    /// Total width, if known.
    pub width: Option<u64>,
    /// Leaf fields with dotted paths.
    pub fields: Vec<LeafEntry>,
}

/// A leaf field of a composite type.
#[derive(Debug, Serialize)]
pub struct LeafEntry {
    /// Dotted path from the type root.
    pub path: String,
    /// Single-line type label.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Width, if known.
    pub width: Option<u64>,
}

/// Runs the `svport types` command.
pub fn run(args: &TypesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;
    let output = project.as_ref().map(|p| &p.config.output);

    let files = collect_inputs(&args.paths, project.as_ref())?;
    let parsed = parse_all_files(&files)?;
    let reports: Vec<TypesReport> = parsed
        .iter()
        .map(|file| TypesReport {
            path: file.path.display().to_string(),
            types: type_entries(&file.registry),
        })
        .filter(|r| !r.types.is_empty())
        .collect();

    let format = args
        .format
        .or_else(|| output.map(|o| o.format.into()))
        .unwrap_or(ReportFormat::Text);
    match format {
        ReportFormat::Text => print!("{}", render_text(&reports)),
        ReportFormat::Json => {
            let json = if output.map_or(true, |o| o.pretty) {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            println!("{json}");
        }
    }

    if reports.is_empty() && !global.quiet {
        eprintln!("warning: no struct or union types found");
    }
    Ok(0)
}

/// Flattens a registry into report entries, in name order.
pub fn type_entries(registry: &TypeRegistry) -> Vec<TypeEntry> {
    registry
        .iter()
        .map(|(name, data_type)| {
            let kind = match data_type {
                DataType::Basic(_) => "basic",
                DataType::Struct(_) => "struct",
                DataType::Union(_) => "union",
            };
            let alias_of = (data_type.name() != name).then(|| data_type.name().to_string());
            let fields = data_type
                .iter_fields("")
                .map(|(path, leaf)| LeafEntry {
                    path,
                    type_name: leaf.to_string(),
                    width: leaf.width(),
                })
                .collect();
            TypeEntry {
                name: name.to_string(),
                kind,
                alias_of,
                width: data_type.width(),
                fields,
            }
        })
        .collect()
}

/// Renders the text report. Aliases are listed without their fields.
pub fn render_text(reports: &[TypesReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", report.path);
        for entry in &report.types {
            if let Some(target) = &entry.alias_of {
                let _ = writeln!(out, "  alias {} = {target}", entry.name);
                continue;
            }
            let _ = writeln!(
                out,
                "  {} {} [{}]",
                entry.kind,
                entry.name,
                width_label(entry.width)
            );
            for leaf in &entry.fields {
                let _ = writeln!(
                    out,
                    "    {}: {} [{}]",
                    leaf.path,
                    leaf.type_name,
                    width_label(leaf.width)
                );
            }
        }
    }
    out
}
