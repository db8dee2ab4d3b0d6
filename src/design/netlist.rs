//! Compilation context for one translation.

use log::debug;

use super::symbols::{SymbolEntry, SymbolTable};
use crate::error::{DpgenError, Result};
use crate::netlist::{DeclKind, Declaration, Operand, Operation};

/// Everything known about a netlist after parsing.
///
/// Owns the symbol table, the four declaration lists and the ordered
/// operation list. Operation order is instantiation order.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    /// Declared and synthesized signals
    pub symbols: SymbolTable,
    /// `input` declarations
    pub inputs: Vec<Declaration>,
    /// `output` declarations
    pub outputs: Vec<Declaration>,
    /// `wire` declarations, including synthesized storage wires
    pub wires: Vec<Declaration>,
    /// `register` declarations
    pub registers: Vec<Declaration>,
    /// Operations in parse order
    pub operations: Vec<Operation>,
}

impl Netlist {
    /// Create an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations of the given kind, in source order.
    pub fn declarations(&self, kind: DeclKind) -> &[Declaration] {
        match kind {
            DeclKind::Input => &self.inputs,
            DeclKind::Output => &self.outputs,
            DeclKind::Wire => &self.wires,
            DeclKind::Register => &self.registers,
        }
    }

    fn declarations_mut(&mut self, kind: DeclKind) -> &mut Vec<Declaration> {
        match kind {
            DeclKind::Input => &mut self.inputs,
            DeclKind::Output => &mut self.outputs,
            DeclKind::Wire => &mut self.wires,
            DeclKind::Register => &mut self.registers,
        }
    }

    /// Record a declaration and add its names to the symbol table.
    ///
    /// A user name that an earlier assignment already claimed for a storage
    /// wire moves that wire to a fresh name.
    pub fn declare(&mut self, decl: Declaration) -> Result<()> {
        if !decl.is_synthesized() {
            for name in &decl.names {
                if self.is_storage_wire(name) {
                    self.rename_storage(name, &decl.names)?;
                }
            }
        }

        let entry = SymbolEntry::new(decl.kind, decl.signed, decl.width);
        for name in &decl.names {
            self.symbols.insert(name, entry, decl.line)?;
        }
        self.declarations_mut(decl.kind).push(decl);
        Ok(())
    }

    /// Append an operation, checking its references.
    ///
    /// An operation that writes an `output` is redirected to a synthesized
    /// wire named `<output><wire_suffix>`, followed by a REG that copies the
    /// wire into the output.
    pub fn add_operation(&mut self, op: Operation, wire_suffix: &str) -> Result<()> {
        for name in op.sources.iter().filter_map(|s| s.signal()) {
            self.symbols.resolve(name, op.line)?;
        }

        let dest = *self.symbols.resolve(&op.destination, op.line)?;
        match dest.kind {
            DeclKind::Input => Err(DpgenError::AssignToInput {
                name: op.destination,
                line: op.line,
            }),
            DeclKind::Output => self.insert_storage(op, dest, wire_suffix),
            DeclKind::Wire | DeclKind::Register => {
                self.operations.push(op);
                Ok(())
            }
        }
    }

    fn insert_storage(
        &mut self,
        mut op: Operation,
        output: SymbolEntry,
        wire_suffix: &str,
    ) -> Result<()> {
        let output_name = std::mem::take(&mut op.destination);
        let wire = self.fresh_name(&format!("{}{}", output_name, wire_suffix), &[]);
        debug!(
            "line {}: inserting storage wire '{}' ahead of output '{}'",
            op.line, wire, output_name
        );

        self.declare(Declaration::new(
            DeclKind::Wire,
            output.signed,
            output.width,
            vec![wire.clone()],
            0,
        ))?;

        let line = op.line;
        op.destination = wire.clone();
        self.operations.push(op);
        self.operations.push(Operation::register(output_name, wire, line));
        Ok(())
    }

    /// `base`, or `base_<n>` for the smallest `n` that is neither declared
    /// nor in `claimed`.
    fn fresh_name(&self, base: &str, claimed: &[String]) -> String {
        let taken = |name: &str| self.symbols.contains(name) || claimed.iter().any(|c| c == name);
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn is_storage_wire(&self, name: &str) -> bool {
        self.wires
            .iter()
            .any(|decl| decl.is_synthesized() && decl.names.iter().any(|n| n == name))
    }

    fn rename_storage(&mut self, name: &str, claimed: &[String]) -> Result<()> {
        let renamed = self.fresh_name(name, claimed);
        debug!("storage wire '{}' renamed to '{}'", name, renamed);

        if let Some(entry) = self.symbols.remove(name) {
            self.symbols.insert(&renamed, entry, 0)?;
        }
        for decl in self.wires.iter_mut().filter(|d| d.is_synthesized()) {
            for n in decl.names.iter_mut().filter(|n| n.as_str() == name) {
                *n = renamed.clone();
            }
        }
        for op in &mut self.operations {
            if op.destination == name {
                op.destination = renamed.clone();
            }
            for source in &mut op.sources {
                if let Operand::Signal(signal) = source {
                    if signal.as_str() == name {
                        *signal = renamed.clone();
                    }
                }
            }
        }
        Ok(())
    }

    /// Output names that no operation writes.
    pub fn undriven_outputs(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .flat_map(|decl| decl.names.iter())
            .filter(|name| !self.operations.iter().any(|op| &op.destination == *name))
            .map(String::as_str)
            .collect()
    }
}
