//! Parser for the behavioral netlist language.
//!
//! The language is line-oriented: every non-blank line is either a
//! declaration or a single assignment with at most one operator.
//!
//! # Grammar Overview
//!
//! ```text
//! line        = declaration | operation
//! declaration = kind type name { "," name }
//! kind        = "input" | "output" | "wire" | "register"
//! type        = ("Int" | "UInt") digits
//! operation   = name "=" rhs
//! rhs         = operand
//!             | operand binop operand
//!             | name "?" operand ":" operand
//! binop       = "+" | "-" | "*" | ">" | "<" | "==" | ">>" | "<<"
//! operand     = name | digits
//! name        = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! Type widths must be 1 or a power of two. A `U` prefix makes the type
//! unsigned. Signals must be declared before they are used.
//!
//! The sequence `//` is an error annotation, not a comment: any line that
//! contains it aborts the translation with the text after the marker as
//! the diagnostic.
//!
//! # Example
//!
//! ```text
//! input Int8 a, b
//! input UInt1 sel
//! output Int8 c
//! wire Int8 sum
//!
//! sum = a + b
//! c = sel ? sum : a
//! ```

mod ast;
mod lexer;
mod normalize;
mod parser;

pub use ast::*;
pub use lexer::{is_type_name, Lexer, Token, TokenKind};
pub use normalize::{normalize, SourceLine, ERROR_MARKER};
pub use parser::{parse_type, Parser};

use log::info;

use crate::config::DEFAULT_WIRE_SUFFIX;
use crate::design::Netlist;
use crate::error::Result;

/// Parse netlist text into a [`Netlist`] using the default storage-wire suffix.
pub fn parse(input: &str) -> Result<Netlist> {
    parse_with_suffix(input, DEFAULT_WIRE_SUFFIX)
}

/// Parse netlist text, naming synthesized storage wires `<output><wire_suffix>`.
pub fn parse_with_suffix(input: &str, wire_suffix: &str) -> Result<Netlist> {
    let lines = normalize(input)?;
    let mut netlist = Netlist::new();

    for line in lines {
        Parser::for_line(line)?.parse_into(&mut netlist, wire_suffix)?;
    }

    info!(
        "parsed {} signal(s) and {} operation(s)",
        netlist.symbols.len(),
        netlist.operations.len()
    );
    Ok(netlist)
}

/// Read a netlist file.
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::error::DpgenError::FileRead {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DpgenError;

    #[test]
    fn test_parse_netlist() {
        let input = "input Int8 a, b\noutput Int8 c\nwire Int8 t\n\nt = a * b\nc = t\n";
        let netlist = parse(input).unwrap();

        assert_eq!(netlist.inputs.len(), 1);
        assert_eq!(netlist.outputs.len(), 1);
        assert_eq!(netlist.wires.len(), 2);
        let operators: Vec<Operator> = netlist.operations.iter().map(|op| op.operator).collect();
        assert_eq!(operators, vec![Operator::Mul, Operator::Reg, Operator::Reg]);
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let err = parse("input Int8 a\nx = a + a\nwire Int8 x\n").unwrap_err();
        assert!(matches!(err, DpgenError::UnresolvedReference { line: 2, .. }));
    }

    #[test]
    fn test_error_marker_aborts_valid_netlist() {
        let err = parse("input Int8 a, b\noutput Int8 c\nc = a + b // done\n").unwrap_err();
        assert!(matches!(err, DpgenError::ErrorMarker { line: 3, .. }));
    }

    #[test]
    fn test_custom_wire_suffix() {
        let netlist = parse_with_suffix("input Int8 a\noutput Int8 c\nc = a\n", "_d").unwrap();
        assert!(netlist.symbols.contains("c_d"));
    }
}
