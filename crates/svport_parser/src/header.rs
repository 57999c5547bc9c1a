//! Location of module headers and their raw parameter/port spans.

use crate::scan::{scan_enclosed, skip_whitespace};
use once_cell::sync::Lazy;
use regex::Regex;

static MODULE_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmodule\b").expect("module keyword pattern"));
static MODULE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^module\s+([A-Za-z_][A-Za-z0-9_$]*)").expect("module name pattern")
});

/// The raw pieces of one module header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleHeader<'a> {
    /// The module name.
    pub name: &'a str,
    /// Text inside `#( ... )`, or empty when there is no parameter list.
    pub params: &'a str,
    /// Text inside the port list parentheses, or empty when there is none.
    pub ports: &'a str,
    /// Offset of the `module` keyword.
    pub start: usize,
    /// Offset just past the last consumed header character.
    pub end: usize,
}

/// Returns an iterator over the module headers in `text`, in source order.
///
/// The `module` keyword is matched case-insensitively and must be followed
/// by an identifier; other occurrences are skipped. Comments and strings are
/// not stripped first, so a `module <name>` inside one is reported too.
pub fn module_headers(text: &str) -> ModuleHeaders<'_> {
    ModuleHeaders { text, pos: 0 }
}

/// Iterator returned by [`module_headers`].
pub struct ModuleHeaders<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for ModuleHeaders<'a> {
    type Item = ModuleHeader<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        loop {
            let keyword = MODULE_KEYWORD.find_at(text, self.pos)?;
            let start = keyword.start();
            let Some(name) = MODULE_NAME.captures(&text[start..]).and_then(|c| c.get(1)) else {
                log::debug!("`module` at offset {start} is not followed by a name");
                self.pos = keyword.end();
                continue;
            };

            let mut pos = skip_whitespace(text, start + name.end());
            let mut params = "";
            if text.as_bytes().get(pos) == Some(&b'#') {
                pos = skip_whitespace(text, pos + 1);
                if text.as_bytes().get(pos) == Some(&b'(') {
                    if let Some(block) = scan_enclosed(text, pos) {
                        params = block.inner;
                        pos = block.end;
                    }
                }
            }

            pos = skip_whitespace(text, pos);
            let mut ports = "";
            if text.as_bytes().get(pos) == Some(&b'(') {
                if let Some(block) = scan_enclosed(text, pos) {
                    ports = block.inner;
                    pos = block.end;
                }
            }

            self.pos = pos;
            return Some(ModuleHeader {
                name: name.as_str(),
                params,
                ports,
                start,
                end: pos,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(text: &str) -> Vec<ModuleHeader<'_>> {
        module_headers(text).collect()
    }

    #[test]
    fn params_and_ports() {
        let h = headers("module m #(parameter N = 4) (input logic a, output logic b); endmodule");
        assert_eq!(h.len(), 1);
        assert_eq!(h[0].name, "m");
        assert_eq!(h[0].params, "parameter N = 4");
        assert_eq!(h[0].ports, "input logic a, output logic b");
    }

    #[test]
    fn ports_only() {
        let h = headers("module top(input clk);\nendmodule");
        assert_eq!(h[0].name, "top");
        assert_eq!(h[0].params, "");
        assert_eq!(h[0].ports, "input clk");
    }

    #[test]
    fn no_lists() {
        let h = headers("module empty; endmodule");
        assert_eq!(h[0].name, "empty");
        assert_eq!(h[0].params, "");
        assert_eq!(h[0].ports, "");
    }

    #[test]
    fn whitespace_around_hash() {
        let h = headers("module w\n  #\n  ( WIDTH = 8 )\n  ( input [WIDTH-1:0] d );");
        assert_eq!(h[0].params, " WIDTH = 8 ");
        assert_eq!(h[0].ports, " input [WIDTH-1:0] d ");
    }

    #[test]
    fn nested_parens_in_params() {
        let h = headers("module n #(parameter W = $clog2(DEPTH) + (1)) (input a);");
        assert_eq!(h[0].params, "parameter W = $clog2(DEPTH) + (1)");
        assert_eq!(h[0].ports, "input a");
    }

    #[test]
    fn multiple_modules_in_order() {
        let names: Vec<_> = headers(
            "module a(input x); endmodule\nMODULE b(output y); endmodule\nmodule c; endmodule",
        )
        .into_iter()
        .map(|h| h.name)
        .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn keyword_without_name_is_skipped() {
        let h = headers("// this module (does things)\nmodule real_one(input a);");
        assert_eq!(h.len(), 1);
        assert_eq!(h[0].name, "real_one");
    }

    #[test]
    fn endmodule_and_identifiers_containing_module_are_ignored() {
        let h = headers("module a; endmodule submodule_x; module_cfg y;");
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn commented_module_is_reported() {
        let h = headers("// module ghost(input a);\nmodule real(input b);");
        let names: Vec<_> = h.iter().map(|h| h.name).collect();
        assert_eq!(names, ["ghost", "real"]);
    }

    #[test]
    fn header_offsets_span_keyword_to_port_list() {
        let text = "wire w;\nmodule a (input x);\nmodule b;";
        let h = headers(text);
        assert_eq!(h[0].start, text.find("module a").unwrap());
        assert_eq!(&text[h[0].start..h[0].end], "module a (input x)");
        assert_eq!(h[1].start, text.find("module b").unwrap());
    }

    #[test]
    fn unbalanced_port_list_runs_to_end() {
        let text = "module broken(input a, input b";
        let h = headers(text);
        assert_eq!(h[0].ports, "input a, input b");
        assert_eq!(h[0].end, text.len());
    }

    #[test]
    fn cursor_skips_consumed_ports() {
        let h = headers(
            "module outer #(parameter string S = \"module fake\") (input a); module inner;",
        );
        let names: Vec<_> = h.iter().map(|h| h.name).collect();
        assert_eq!(names, ["outer", "inner"]);
    }
}
