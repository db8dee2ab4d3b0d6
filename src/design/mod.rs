//! Symbol table and compilation context.
//!
//! The [`Netlist`] owns everything a translation learns while parsing:
//! the [`SymbolTable`], the declaration lists and the operation list.
//! It is built by the parser and consumed by the Verilog emitter.

mod netlist;
mod symbols;

pub use netlist::Netlist;
pub use symbols::{SymbolEntry, SymbolTable, CLOCK, RESET};
