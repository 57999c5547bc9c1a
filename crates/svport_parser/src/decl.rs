//! Parameter and port list parsing.

use crate::registry::TypeRegistry;
use crate::resolve::{resolve_type, split_declaration};
use crate::scan::{find_top_level, leading_identifier, split_top_level, strip_keyword};
use svport_model::{Direction, Parameter, Port};

/// Parses the text of a `#( ... )` parameter list.
///
/// Each entry may start with `parameter` or `localparam`; the default value
/// after the first top-level `=` is kept verbatim. Entries without a
/// recognisable name are dropped.
///
/// A `parameter type T = X` entry whose default `X` is already registered
/// makes `T` an alias of `X` in `registry`, so ports declared later with
/// type `T` resolve to `X`. Entries are processed strictly in order, so an
/// alias can only name types known before it.
pub fn parse_parameter_list(text: &str, registry: &mut TypeRegistry) -> Vec<Parameter> {
    let mut params = Vec::new();
    for item in split_top_level(text, ',') {
        let item = trim_item(item);
        if item.is_empty() {
            continue;
        }
        let item = strip_keyword(item, "parameter")
            .or_else(|| strip_keyword(item, "localparam"))
            .map_or(item, str::trim);

        let (decl, default) = match find_top_level(item, '=') {
            Some(eq) => (item[..eq].trim(), Some(item[eq + 1..].trim())),
            None => (item, None),
        };

        let parsed = split_declaration(decl);
        let Some(name) = parsed.name else {
            log::debug!("dropping parameter without a name: `{item}`");
            continue;
        };
        let data_type = resolve_type(&parsed.type_spec, registry);
        params.push(Parameter::new(name, data_type, default.map(str::to_string)));

        if strip_keyword(parsed.type_spec.trim_start(), "type").is_some() {
            if let Some(target) = default.map(trim_item) {
                if registry.alias(name, target) {
                    log::trace!("type parameter {name} aliases {target}");
                }
            }
        }
    }
    params
}

/// Parses the text of an ANSI port list.
///
/// Every entry must begin with `input`, `output` or `inout` (exact case).
/// Entries without a direction, such as non-ANSI name lists or the extra
/// names in `input a, b`, are dropped.
pub fn parse_port_list(text: &str, registry: &TypeRegistry) -> Vec<Port> {
    let mut ports = Vec::new();
    for item in split_top_level(text, ',') {
        let item = trim_item(item);
        if item.is_empty() {
            continue;
        }
        let Some((direction, rest)) = split_direction(item) else {
            log::debug!("dropping port without a direction: `{item}`");
            continue;
        };
        let parsed = split_declaration(rest.trim());
        let Some(name) = parsed.name else {
            log::debug!("dropping port without a name: `{item}`");
            continue;
        };
        ports.push(Port::new(
            name,
            direction,
            resolve_type(&parsed.type_spec, registry),
        ));
    }
    ports
}

/// Splits a leading direction keyword off a port declaration.
fn split_direction(item: &str) -> Option<(Direction, &str)> {
    let keyword = leading_identifier(item)?;
    let direction = Direction::from_keyword(keyword)?;
    Some((direction, &item[keyword.len()..]))
}

/// Trims whitespace and any trailing `,`/`;` noise.
fn trim_item(item: &str) -> &str {
    item.trim().trim_end_matches([',', ';']).trim_end()
}
