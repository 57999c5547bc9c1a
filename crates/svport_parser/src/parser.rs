//! Parser context tying the extraction passes together.
//!
//! [`SvParser`] owns the [`TypeRegistry`] for one extraction. Each call to
//! [`SvParser::parse_text`] rebuilds the registry from scratch, so one parser
//! can be reused for many sources without state leaking between them.

use crate::decl::{parse_parameter_list, parse_port_list};
use crate::header::module_headers;
use crate::registry::TypeRegistry;
use crate::typedef::extract_composite_types;
use std::path::Path;
use svport_model::Module;

/// A producer of [`Module`] interfaces from source text.
///
/// [`SvParser`] is the structural implementation. Consumers that only need
/// module interfaces can be written against this trait instead.
pub trait InterfaceExtractor {
    /// Extracts every module interface in `source`, in source order.
    fn extract(&mut self, source: &str) -> Vec<Module>;

    /// Reads `path` and extracts its module interfaces.
    ///
    /// I/O errors are returned unchanged.
    fn extract_file(&mut self, path: &Path) -> std::io::Result<Vec<Module>> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.extract(&source))
    }
}

/// Structural SystemVerilog interface parser.
#[derive(Debug, Default)]
pub struct SvParser {
    registry: TypeRegistry,
}

impl SvParser {
    /// Creates a parser with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the composite types and aliases seen by the last parse.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Parses every module header in `source`.
    ///
    /// Struct and union typedefs anywhere in `source` are collected first,
    /// then each module's parameters are parsed (which may add `parameter
    /// type` aliases) before its ports. Aliases stay visible to the modules
    /// that follow within the same call.
    pub fn parse_text(&mut self, source: &str) -> Vec<Module> {
        self.registry = extract_composite_types(source);
        module_headers(source)
            .map(|header| {
                let parameters = parse_parameter_list(header.params, &mut self.registry);
                let ports = parse_port_list(header.ports, &self.registry);
                log::trace!(
                    "module {} at offset {}: {} parameters, {} ports",
                    header.name,
                    header.start,
                    parameters.len(),
                    ports.len()
                );
                Module::new(header.name, parameters, ports)
            })
            .collect()
    }

    /// Reads `path` and parses its contents with [`SvParser::parse_text`].
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<Vec<Module>> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.parse_text(&source))
    }
}

impl InterfaceExtractor for SvParser {
    fn extract(&mut self, source: &str) -> Vec<Module> {
        self.parse_text(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "typedef struct packed { logic [7:0] data; logic valid; } payload_t;";

    #[test]
    fn registry_reflects_last_parse() {
        let mut parser = SvParser::new();
        parser.parse_text(PAYLOAD);
        assert!(parser.registry().contains("payload_t"));
        parser.parse_text("module m(input logic a);");
        assert!(parser.registry().is_empty());
    }

    #[test]
    fn alias_visible_to_later_modules_in_same_call() {
        let source = format!(
            "{PAYLOAD}
             module a #(parameter type data_t = payload_t) (input data_t x);
             endmodule
             module b (input data_t y);
             endmodule"
        );
        let mut parser = SvParser::new();
        let modules = parser.parse_text(&source);
        let payload = parser.registry().get("payload_t").unwrap();
        assert!(modules[1].ports[0].data_type.ptr_eq(payload));
    }

    #[test]
    fn alias_does_not_leak_between_calls() {
        let mut parser = SvParser::new();
        parser.parse_text(&format!("{PAYLOAD} module a #(parameter type data_t = payload_t);"));
        assert!(parser.registry().contains("data_t"));
        let modules = parser.parse_text("module b (input data_t y);");
        assert_eq!(modules[0].ports[0].type_name(), "data_t");
        assert!(!parser.registry().contains("data_t"));
    }

    #[test]
    fn trait_object_dispatch() {
        let mut extractor: Box<dyn InterfaceExtractor> = Box::new(SvParser::new());
        let modules = extractor.extract("module m; module n;");
        assert_eq!(modules.len(), 2);
    }
}
