//! Symbol table mapping signal names to their declared shape.

use std::collections::HashMap;

use crate::error::{DpgenError, Result};
use crate::netlist::DeclKind;

/// Clock and reset ports shared by every generated module.
pub const CLOCK: &str = "Clk";
/// Reset port name.
pub const RESET: &str = "Rst";

/// Names implicitly declared as ports of every module.
const RESERVED: [&str; 2] = [CLOCK, RESET];

/// Declared kind, signedness and width of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Declaration kind
    pub kind: DeclKind,
    /// Whether the signal is signed
    pub signed: bool,
    /// Bit width
    pub width: u32,
}

impl SymbolEntry {
    /// Create a symbol entry.
    pub fn new(kind: DeclKind, signed: bool, width: u32) -> Self {
        Self { kind, signed, width }
    }
}

/// Mapping from signal name to [`SymbolEntry`].
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new signal. Fails if the name is already declared or reserved.
    pub fn insert(&mut self, name: &str, entry: SymbolEntry, line: usize) -> Result<()> {
        if self.contains(name) {
            return Err(DpgenError::DuplicateDeclaration {
                name: name.to_string(),
                line,
            });
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Look up a signal.
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    /// Look up a signal referenced at `line`, failing if it was never declared.
    pub fn resolve(&self, name: &str, line: usize) -> Result<&SymbolEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| DpgenError::unresolved(name, line))
    }

    /// Remove a signal, returning its entry.
    pub fn remove(&mut self, name: &str) -> Option<SymbolEntry> {
        self.entries.remove(name)
    }

    /// Check whether a name is declared or reserved.
    pub fn contains(&self, name: &str) -> bool {
        RESERVED.contains(&name) || self.entries.contains_key(name)
    }

    /// Number of declared signals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
