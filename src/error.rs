//! Error types for the dpgen netlist translator.
//!
//! This module provides a unified error type [`DpgenError`] that covers
//! every failure that can abort a translation: reading the netlist,
//! lexing and parsing it, resolving signal references, and writing the
//! generated Verilog.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`DpgenError`].
pub type Result<T> = std::result::Result<T, DpgenError>;

/// Broad failure class of a [`DpgenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input netlist could not be read
    FileAccess,
    /// The netlist text is not valid
    Syntax,
    /// An operand names a signal that was never declared
    UnresolvedReference,
    /// The generated Verilog could not be written
    Output,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::FileAccess => "FileAccessError",
            ErrorClass::Syntax => "SyntaxError",
            ErrorClass::UnresolvedReference => "UnresolvedReferenceError",
            ErrorClass::Output => "OutputError",
        };
        f.write_str(name)
    }
}

/// Unified error type for all dpgen operations.
#[derive(Error, Debug)]
pub enum DpgenError {
    // ============ File Access Errors ============
    /// Error reading the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ Syntax Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// Explicit error annotation (`//`) found in the netlist
    #[error("Error marker at line {line}: {message}")]
    ErrorMarker { line: usize, message: String },

    /// Bit width that is neither 1 nor a power of two
    #[error("Invalid bit width {width} in type '{type_name}' at line {line}")]
    InvalidWidth {
        type_name: String,
        width: u64,
        line: usize,
    },

    /// Type token that is not `Int<N>` or `UInt<N>`
    #[error("Invalid type '{type_name}' at line {line} (expected Int<N> or UInt<N>)")]
    InvalidType { type_name: String, line: usize },

    /// Structurally broken declaration line
    #[error("Malformed declaration at line {line}: {message}")]
    MalformedDeclaration { line: usize, message: String },

    /// Signal declared more than once
    #[error("Duplicate declaration of '{name}' at line {line}")]
    DuplicateDeclaration { name: String, line: usize },

    /// Operator token with no primitive counterpart
    #[error("Unknown operator '{operator}' at line {line}")]
    UnknownOperator { operator: String, line: usize },

    /// Structurally broken assignment line
    #[error("Malformed operation at line {line}: {message}")]
    MalformedOperation { line: usize, message: String },

    /// Assignment whose destination is a module input
    #[error("Cannot assign to input '{name}' at line {line}")]
    AssignToInput { name: String, line: usize },

    // ============ Reference Errors ============
    /// Operand used before (or without) a declaration
    #[error("Undeclared signal '{name}' referenced at line {line}")]
    UnresolvedReference { name: String, line: usize },

    // ============ Output Errors ============
    /// Error writing the Verilog file
    #[error("Failed to write Verilog file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DpgenError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a malformed declaration error
    pub fn declaration(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            line,
            message: message.into(),
        }
    }

    /// Create a malformed operation error
    pub fn operation(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedOperation {
            line,
            message: message.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved(name: impl Into<String>, line: usize) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            line,
        }
    }

    /// The failure class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::FileRead { .. } => ErrorClass::FileAccess,
            Self::Lexer { .. }
            | Self::ErrorMarker { .. }
            | Self::InvalidWidth { .. }
            | Self::InvalidType { .. }
            | Self::MalformedDeclaration { .. }
            | Self::DuplicateDeclaration { .. }
            | Self::UnknownOperator { .. }
            | Self::MalformedOperation { .. }
            | Self::AssignToInput { .. } => ErrorClass::Syntax,
            Self::UnresolvedReference { .. } => ErrorClass::UnresolvedReference,
            Self::FileWrite { .. } => ErrorClass::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(DpgenError::lexer(1, 3, "x").class(), ErrorClass::Syntax);
        assert_eq!(DpgenError::unresolved("a", 2).class(), ErrorClass::UnresolvedReference);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = DpgenError::FileRead {
            path: "in.txt".to_string(),
            source: io,
        };
        assert_eq!(err.class(), ErrorClass::FileAccess);
    }

    #[test]
    fn test_display_names_offending_text() {
        let err = DpgenError::UnknownOperator {
            operator: "/".to_string(),
            line: 4,
        };
        assert_eq!(err.to_string(), "Unknown operator '/' at line 4");
        assert_eq!(err.class().to_string(), "SyntaxError");
    }
}
