//! Extraction of `typedef struct` / `typedef union` definitions.

use crate::registry::TypeRegistry;
use crate::resolve::{resolve_type, split_declaration};
use crate::scan::{scan_enclosed, split_top_level, strip_comments};
use once_cell::sync::Lazy;
use regex::Regex;
use svport_model::{CompositeType, DataType, StructField};

static TYPEDEF_COMPOSITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btypedef\s+(struct|union)\b").expect("typedef pattern")
});
static TYPE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\w+)").expect("type name pattern"));

/// Builds a registry of every struct and union typedef in `text`.
///
/// Definitions are found in one left-to-right pass. Fields are resolved
/// against the types registered so far, so a field whose type was defined
/// earlier in the text becomes a nested composite. A typedef with no name
/// after its closing brace is skipped; a repeated name replaces the earlier
/// definition.
pub fn extract_composite_types(text: &str) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    let mut pos = 0;
    while let Some(caps) = TYPEDEF_COMPOSITE.captures_at(text, pos) {
        let keyword = caps.get(0).map_or(pos, |m| m.end());
        let is_union = caps[1].eq_ignore_ascii_case("union");

        let Some(brace) = text[keyword..].find('{').map(|off| keyword + off) else {
            break;
        };
        let Some(body) = scan_enclosed(text, brace) else {
            break;
        };
        pos = body.end;

        let Some(name) = TYPE_NAME.captures(&text[body.end..]).and_then(|c| c.get(1)) else {
            let offset = caps.get(0).map_or(0, |m| m.start());
            log::debug!("skipping unnamed typedef at offset {offset}");
            continue;
        };
        pos = body.end + name.end();

        let composite = CompositeType::new(name.as_str(), parse_fields(body.inner, &registry));
        log::trace!(
            "registered {} {} with {} fields",
            if is_union { "union" } else { "struct" },
            composite.name,
            composite.fields.len()
        );
        let data_type = if is_union {
            DataType::new_union(composite)
        } else {
            DataType::new_struct(composite)
        };
        registry.insert(name.as_str(), data_type);
    }
    registry
}

/// Parses the declarations inside a struct or union body.
///
/// `logic [7:0] a, b;` declares two fields that share one resolved type.
fn parse_fields(body: &str, registry: &TypeRegistry) -> Vec<StructField> {
    let body = strip_comments(body);
    let mut fields = Vec::new();
    for statement in split_top_level(&body, ';') {
        let declarators: Vec<&str> = split_top_level(statement, ',')
            .into_iter()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        let Some((first, rest)) = declarators.split_first() else {
            continue;
        };

        let head = split_declaration(first);
        let shared = resolve_type(&head.type_spec, registry);
        let names = std::iter::once(head.name)
            .chain(rest.iter().map(|d| split_declaration(d).name));
        for name in names {
            match name {
                Some(name) => fields.push(StructField::new(name, shared.clone())),
                None => log::debug!("dropping unnamed field in `{}`", statement.trim()),
            }
        }
    }
    fields
}
