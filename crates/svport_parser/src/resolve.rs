//! Declaration splitting and textual type resolution.

use crate::registry::TypeRegistry;
use crate::scan::leading_identifier;
use svport_model::{BasicType, DataType};

/// Built-in net and data type keywords recognised by the resolver.
pub const BUILTIN_TYPES: &[&str] = &[
    "logic",
    "wire",
    "reg",
    "bit",
    "var",
    "integer",
    "int",
    "byte",
    "shortint",
    "longint",
    "time",
    "real",
    "realtime",
    "shortreal",
];

/// A declaration split into its type text and declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Everything before the name, single-space joined. May be empty.
    pub type_spec: String,
    /// The declared identifier, without any attached array suffix.
    pub name: Option<&'a str>,
}

/// Splits `"<type-spec> <name>"` into its parts.
///
/// Anything from the first `=` on is ignored. The last whitespace-separated
/// token is the declarator; only its leading identifier characters are kept,
/// so `mem[3:0]` yields `mem`. A declarator that does not start with an
/// identifier character yields no name.
pub fn split_declaration(decl: &str) -> Declaration<'_> {
    let before_value = decl.split('=').next().unwrap_or_default();
    let mut tokens: Vec<&str> = before_value.split_whitespace().collect();
    let Some(declarator) = tokens.pop() else {
        return Declaration {
            type_spec: String::new(),
            name: None,
        };
    };
    Declaration {
        type_spec: tokens.join(" "),
        name: leading_identifier(declarator),
    }
}

/// Resolves a textual type specification such as `logic signed [7:0]` or
/// `payload_t`.
///
/// A token that is not a range, `signed`, or a [`BUILTIN_TYPES`] keyword is
/// taken as a user type name (the last one wins). If that name is registered,
/// the registered type is returned as-is and any range or `signed` modifier
/// next to it is dropped. Otherwise the result is a [`BasicType`] named after
/// the user type, else the built-in keyword, else `logic`.
pub fn resolve_type(spec: &str, registry: &TypeRegistry) -> DataType {
    let spec = normalize_ranges(spec);
    let mut bit_range: Option<String> = None;
    let mut signed = false;
    let mut net_type: Option<&str> = None;
    let mut user_type: Option<&str> = None;

    for token in spec.split_whitespace() {
        if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') {
            match &mut bit_range {
                Some(range) => {
                    range.push(' ');
                    range.push_str(token);
                }
                None => bit_range = Some(token.to_string()),
            }
        } else if token.eq_ignore_ascii_case("signed") {
            signed = true;
        } else if BUILTIN_TYPES.iter().any(|kw| token.eq_ignore_ascii_case(kw)) {
            net_type = Some(token);
        } else {
            user_type = Some(token);
        }
    }

    if let Some(registered) = user_type.and_then(|name| registry.get(name)) {
        return registered.clone();
    }

    let name = user_type.or(net_type).unwrap_or("logic");
    DataType::Basic(BasicType {
        name: name.to_string(),
        bit_range,
        signed,
    })
}

/// Rewrites packed ranges so each one is a single whitespace-free token.
///
/// `logic[7:0]` becomes `logic [7:0]` and `[7 : 0]` becomes `[7:0]`.
/// Adjacent dimensions such as `[3:0][7:0]` stay glued together.
fn normalize_ranges(spec: &str) -> String {
    let mut out = String::with_capacity(spec.len() + 2);
    let mut depth = 0usize;
    let mut chars = spec.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '[' => {
                let attached = out
                    .chars()
                    .last()
                    .is_some_and(|c| !c.is_whitespace() && c != ']');
                if depth == 0 && attached {
                    out.push(' ');
                }
                depth += 1;
                out.push(ch);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                out.push(ch);
                if depth == 0 && chars.peek().is_some_and(|&c| !c.is_whitespace() && c != '[') {
                    out.push(' ');
                }
            }
            c if depth > 0 && c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use svport_model::{CompositeType, StructField};

    fn basic(dt: DataType) -> BasicType {
        match dt {
            DataType::Basic(b) => b,
            other => panic!("expected basic type, got {other:?}"),
        }
    }

    #[test]
    fn split_simple() {
        let d = split_declaration("logic [7:0] data");
        assert_eq!(d.type_spec, "logic [7:0]");
        assert_eq!(d.name, Some("data"));
    }

    #[test]
    fn split_drops_array_suffix_and_value() {
        let d = split_declaration("logic mem[3:0] = '0");
        assert_eq!(d.type_spec, "logic");
        assert_eq!(d.name, Some("mem"));
    }

    #[test]
    fn split_without_type() {
        let d = split_declaration("  clk ");
        assert_eq!(d.type_spec, "");
        assert_eq!(d.name, Some("clk"));
    }

    #[test]
    fn split_without_name() {
        assert_eq!(split_declaration("").name, None);
        assert_eq!(split_declaration("= 4").name, None);
        let d = split_declaration("logic [3:0]");
        assert_eq!(d.type_spec, "logic");
        assert_eq!(d.name, None);
    }

    #[test]
    fn resolve_defaults_to_logic() {
        let b = basic(resolve_type("", &TypeRegistry::new()));
        assert_eq!(b, BasicType::new("logic"));
    }

    #[test]
    fn resolve_net_type_with_range_and_sign() {
        let b = basic(resolve_type("wire signed [15:0]", &TypeRegistry::new()));
        assert_eq!(b.name, "wire");
        assert!(b.signed);
        assert_eq!(b.bit_range.as_deref(), Some("[15:0]"));
        assert_eq!(b.width(), Some(16));
    }

    #[test]
    fn resolve_keeps_keyword_case() {
        let b = basic(resolve_type("LOGIC SIGNED", &TypeRegistry::new()));
        assert_eq!(b.name, "LOGIC");
        assert!(b.signed);
    }

    #[test]
    fn resolve_multiple_ranges() {
        let b = basic(resolve_type("logic [3:0] [7:0]", &TypeRegistry::new()));
        assert_eq!(b.bit_range.as_deref(), Some("[3:0] [7:0]"));
    }

    #[test]
    fn resolve_attached_and_spaced_ranges() {
        let b = basic(resolve_type("logic[31:0]", &TypeRegistry::new()));
        assert_eq!(b.name, "logic");
        assert_eq!(b.bit_range.as_deref(), Some("[31:0]"));

        let b = basic(resolve_type("bit [ 7 : 0 ]", &TypeRegistry::new()));
        assert_eq!(b.bit_range.as_deref(), Some("[7:0]"));
        assert_eq!(b.width(), Some(8));
    }

    #[test]
    fn resolve_unknown_user_type() {
        let b = basic(resolve_type("var my_t [3:0]", &TypeRegistry::new()));
        assert_eq!(b.name, "my_t");
        assert_eq!(b.bit_range.as_deref(), Some("[3:0]"));
    }

    #[test]
    fn resolve_registered_type_drops_modifiers() {
        let mut reg = TypeRegistry::new();
        let payload = DataType::new_struct(CompositeType::new(
            "payload_t",
            vec![StructField::new("valid", BasicType::new("logic"))],
        ));
        reg.insert("payload_t", payload.clone());
        let resolved = resolve_type("payload_t signed [3:0]", &reg);
        assert!(resolved.ptr_eq(&payload));
    }

    #[test]
    fn normalize_ranges_cases() {
        assert_eq!(normalize_ranges("logic[7:0]"), "logic [7:0]");
        assert_eq!(normalize_ranges("logic [7 : 0]"), "logic [7:0]");
        assert_eq!(normalize_ranges("logic[3:0][7:0]"), "logic [3:0][7:0]");
        assert_eq!(normalize_ranges("[3:0]signed"), "[3:0] signed");
    }
}
