//! Structural extractor for SystemVerilog module interfaces.
//!
//! This crate pulls module names, parameters, ports, and struct/union port
//! types out of SystemVerilog source text without building a full syntax
//! tree. It never elaborates and never reports syntax errors: anything it
//! does not recognise is skipped. The main entry points are [`parse_text`]
//! and [`parse_file`], which return [`svport_model::Module`] values.
//!
//! # Architecture
//!
//! - **Scanner** ([`scan`]): balanced-delimiter capture and bracket-aware
//!   splitting of raw text.
//! - **Typedefs** ([`typedef`]): builds a [`TypeRegistry`] of every
//!   `typedef struct` / `typedef union` in the source.
//! - **Headers** ([`header`]): finds `module` headers and their raw
//!   parameter and port list text.
//! - **Declarations** ([`decl`], [`resolve`]): turns list entries into
//!   [`svport_model::Parameter`] and [`svport_model::Port`] values, resolving
//!   type names through the registry.
//! - **Context** ([`parser`]): [`SvParser`] runs the passes in order.

#![warn(missing_docs)]

pub mod decl;
pub mod header;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod scan;
pub mod typedef;

pub use parser::{InterfaceExtractor, SvParser};
pub use registry::TypeRegistry;

use std::path::Path;
use svport_model::Module;

/// Parses all modules in `source` with a fresh [`SvParser`].
pub fn parse_text(source: &str) -> Vec<Module> {
    SvParser::new().parse_text(source)
}

/// Reads `path` and parses all modules in it.
///
/// I/O errors are returned unchanged.
pub fn parse_file(path: impl AsRef<Path>) -> std::io::Result<Vec<Module>> {
    SvParser::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use svport_model::{DataType, Direction};

    const END_TO_END: &str = "
        typedef struct packed {
            logic [7:0] data;
            logic       valid;
        } payload_t;

        module my_mod #(
            parameter int WIDTH = 8,
            parameter type data_t = payload_t
        ) (
            input logic clk,
            input data_t in_data
        );
        endmodule
    ";

    #[test]
    fn integration_end_to_end() {
        let mut parser = SvParser::new();
        let modules = parser.parse_text(END_TO_END);
        assert_eq!(modules.len(), 1);
        let m = &modules[0];
        assert_eq!(m.name, "my_mod");

        let params: Vec<_> = m.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, ["WIDTH", "data_t"]);
        assert_eq!(m.parameter("WIDTH").unwrap().default.as_deref(), Some("8"));

        let clk = m.port("clk").unwrap();
        assert_eq!(clk.direction, Direction::Input);
        assert_eq!(clk.type_name(), "logic");

        let in_data = m.port("in_data").unwrap();
        let payload = parser.registry().get("payload_t").unwrap();
        assert!(in_data.data_type.ptr_eq(payload));
        assert!(matches!(in_data.data_type, DataType::Struct(_)));
        let widths: Vec<_> = in_data
            .data_type
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.width()))
            .collect();
        assert_eq!(widths, [("data", Some(8)), ("valid", Some(1))]);
        assert_eq!(in_data.width(), Some(9));
    }

    #[test]
    fn integration_multiple_modules() {
        let modules = parse_text(
            "module a #(parameter N = 1) (input logic x);
             endmodule
             module b (output logic [3:0] y, output logic z);
             endmodule
             module c;
             endmodule",
        );
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(modules[0].parameters.len(), 1);
        assert_eq!(modules[0].ports.len(), 1);
        assert!(modules[1].parameters.is_empty());
        assert_eq!(modules[1].ports.len(), 2);
        assert!(modules[2].ports.is_empty());
    }

    #[test]
    fn parse_text_is_idempotent() {
        let mut parser = SvParser::new();
        let first = parser.parse_text(END_TO_END);
        let second = parser.parse_text(END_TO_END);
        assert_eq!(first, second);
        assert_eq!(parse_text(END_TO_END), first);
    }

    #[test]
    fn empty_source() {
        assert!(parse_text("").is_empty());
        assert!(parse_text("// nothing here\n").is_empty());
    }

    #[test]
    fn parse_file_reads_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(END_TO_END.as_bytes()).unwrap();
        let modules = parse_file(file.path()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].ports.len(), 2);
    }

    #[test]
    fn parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("missing.sv")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn extract_file_through_trait() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"module t(input logic a);").unwrap();
        let mut parser = SvParser::new();
        let modules = parser.extract_file(file.path()).unwrap();
        assert_eq!(modules[0].name, "t");
    }
}
