//! Module width and signedness for each operation.

use crate::design::SymbolTable;
use crate::error::Result;
use crate::netlist::{Operand, Operation};

/// Resolved `DATAWIDTH` and signedness of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Module bit width
    pub width: u32,
    /// Whether the signed primitive is used
    pub signed: bool,
}

/// Declared width of an operand; `None` for literals.
pub fn operand_width(operand: &Operand, symbols: &SymbolTable, line: usize) -> Result<Option<u32>> {
    match operand {
        Operand::Signal(name) => Ok(Some(symbols.resolve(name, line)?.width)),
        Operand::Literal(_) => Ok(None),
    }
}

/// Resolve the module width and signedness of `op`.
///
/// Comparisons take the widest compared operand; every other operator takes
/// the destination's width. The operation is signed when any data operand
/// (not the destination, not a mux condition) is a signed signal.
pub fn resolve(op: &Operation, symbols: &SymbolTable) -> Result<Resolution> {
    let dest_width = symbols.resolve(&op.destination, op.line)?.width;

    let width = if op.operator.is_comparison() {
        let mut widest = None;
        for source in &op.sources {
            if let Some(w) = operand_width(source, symbols, op.line)? {
                widest = Some(widest.map_or(w, |cur: u32| cur.max(w)));
            }
        }
        widest.unwrap_or(dest_width)
    } else {
        dest_width
    };

    let mut signed = false;
    for name in op.data_sources().iter().filter_map(Operand::signal) {
        if symbols.resolve(name, op.line)?.signed {
            signed = true;
        }
    }

    Ok(Resolution { width, signed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;

    fn resolve_last(input: &str, index: usize) -> Resolution {
        let netlist = netlist::parse(input).unwrap();
        resolve(&netlist.operations[index], &netlist.symbols).unwrap()
    }

    #[test]
    fn test_destination_width_ignores_operand_widths() {
        let input = "input Int64 a\ninput Int2 b\nwire UInt16 x\nx = a + b\n";
        assert_eq!(resolve_last(input, 0), Resolution { width: 16, signed: true });
    }

    #[test]
    fn test_comparison_uses_widest_operand() {
        let input = "input Int8 a\ninput Int16 b\noutput Int1 c\nc = a > b\n";
        assert_eq!(resolve_last(input, 0), Resolution { width: 16, signed: true });
        // Storage register follows the output width.
        assert_eq!(resolve_last(input, 1), Resolution { width: 1, signed: true });
    }

    #[test]
    fn test_unsigned_when_all_operands_unsigned() {
        let input = "input UInt8 a, b\nwire Int8 x\nx = a - b\n";
        assert_eq!(resolve_last(input, 0), Resolution { width: 8, signed: false });
    }

    #[test]
    fn test_mux_condition_does_not_make_it_signed() {
        let input = "input Int1 s\ninput UInt8 a, b\nwire UInt8 d\nd = s ? a : b\n";
        assert!(!resolve_last(input, 0).signed);
    }

    #[test]
    fn test_literal_operands() {
        let input = "input UInt32 a\nwire UInt1 z\nz = a == 0\n";
        assert_eq!(resolve_last(input, 0), Resolution { width: 32, signed: false });

        let input = "wire UInt4 z\nz = 3 < 5\n";
        assert_eq!(resolve_last(input, 0).width, 4);
    }
}
