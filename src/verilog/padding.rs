//! Sign and zero extension of operands narrower than the module width.

use std::fmt;

use super::resolve::Resolution;
use crate::design::SymbolTable;
use crate::error::Result;
use crate::netlist::{Operand, Operation};

/// How missing high-order bits are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Replicate the most significant bit
    Sign,
    /// Fill with zeros
    Zero,
}

impl Extension {
    /// Sign extension for signed operations, zero extension otherwise.
    pub fn for_signedness(signed: bool) -> Self {
        if signed {
            Self::Sign
        } else {
            Self::Zero
        }
    }
}

/// An expression connected to a primitive port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortExpr {
    /// A declared signal at its own width
    Signal { name: String, width: u32 },
    /// An integer literal
    Literal(u64),
    /// A signal extended from `width` to `target` bits
    Extended {
        name: String,
        width: u32,
        target: u32,
        extension: Extension,
    },
    /// A single constant bit, e.g. an unused comparator flag
    Bit(bool),
}

impl PortExpr {
    /// Build the port expression for an operand.
    pub fn from_operand(operand: &Operand, symbols: &SymbolTable, line: usize) -> Result<Self> {
        match operand {
            Operand::Signal(name) => Ok(Self::Signal {
                name: name.clone(),
                width: symbols.resolve(name, line)?.width,
            }),
            Operand::Literal(value) => Ok(Self::Literal(*value)),
        }
    }

    /// Effective width; `None` for unsized literals.
    pub fn width(&self) -> Option<u32> {
        match self {
            Self::Signal { width, .. } => Some(*width),
            Self::Extended { target, .. } => Some(*target),
            Self::Literal(_) => None,
            Self::Bit(_) => Some(1),
        }
    }

    /// Extend the expression to `target` bits if it is narrower.
    ///
    /// Expressions at or above `target`, literals and constant bits are
    /// returned unchanged, so padding twice to the same width is a no-op.
    pub fn pad(self, target: u32, extension: Extension) -> Self {
        match self {
            Self::Signal { name, width } if width < target => Self::Extended {
                name,
                width,
                target,
                extension,
            },
            Self::Extended {
                name,
                width,
                target: current,
                ..
            } if current < target => Self::Extended {
                name,
                width,
                target,
                extension,
            },
            other => other,
        }
    }
}

impl fmt::Display for PortExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal { name, .. } => f.write_str(name),
            Self::Literal(value) => write!(f, "{}", value),
            Self::Bit(bit) => write!(f, "1'b{}", u8::from(*bit)),
            Self::Extended {
                name,
                width,
                target,
                extension,
            } => {
                let missing = target - width;
                match extension {
                    Extension::Zero => write!(f, "{{{}'b0, {}}}", missing, name),
                    Extension::Sign if *width == 1 => {
                        write!(f, "{{{{{}{{{}}}}}, {}}}", missing, name, name)
                    }
                    Extension::Sign => {
                        write!(f, "{{{{{}{{{}[{}]}}}}, {}}}", missing, name, width - 1, name)
                    }
                }
            }
        }
    }
}

/// Port expressions for the sources of `op`, padded to the resolved width.
///
/// The result is aligned with `op.sources`. A mux condition is never padded.
pub fn pad_sources(
    op: &Operation,
    resolution: Resolution,
    symbols: &SymbolTable,
) -> Result<Vec<PortExpr>> {
    let extension = Extension::for_signedness(resolution.signed);
    let condition = op.condition();

    op.sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let expr = PortExpr::from_operand(source, symbols, op.line)?;
            if index == 0 && condition.is_some() {
                Ok(expr)
            } else {
                Ok(expr.pad(resolution.width, extension))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;

    fn signal(name: &str, width: u32) -> PortExpr {
        PortExpr::Signal {
            name: name.to_string(),
            width,
        }
    }

    #[test]
    fn test_sign_extension() {
        let padded = signal("a", 8).pad(16, Extension::Sign);
        assert_eq!(padded.to_string(), "{{8{a[7]}}, a}");
        assert_eq!(padded.width(), Some(16));
    }

    #[test]
    fn test_zero_extension() {
        assert_eq!(signal("a", 4).pad(32, Extension::Zero).to_string(), "{28'b0, a}");
    }

    #[test]
    fn test_single_bit_sign_extension() {
        assert_eq!(signal("s", 1).pad(4, Extension::Sign).to_string(), "{{3{s}}, s}");
    }

    #[test]
    fn test_wide_operands_pass_through() {
        assert_eq!(signal("a", 16).pad(8, Extension::Sign), signal("a", 16));
        assert_eq!(signal("a", 8).pad(8, Extension::Zero), signal("a", 8));
        assert_eq!(PortExpr::Literal(3).pad(8, Extension::Zero), PortExpr::Literal(3));
    }

    #[test]
    fn test_padding_is_idempotent() {
        for extension in [Extension::Sign, Extension::Zero] {
            let once = signal("a", 2).pad(8, extension);
            let twice = once.clone().pad(8, extension);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_repadding_to_wider_target_starts_from_source() {
        let padded = signal("a", 4).pad(8, Extension::Zero).pad(16, Extension::Zero);
        assert_eq!(padded.to_string(), "{12'b0, a}");
    }

    #[test]
    fn test_pad_sources_skips_mux_condition() {
        let input = "input UInt1 s\ninput UInt4 a\ninput UInt8 b\nwire UInt8 d\nd = s ? a : b\n";
        let netlist = netlist::parse(input).unwrap();
        let op = &netlist.operations[0];
        let resolution = Resolution { width: 8, signed: false };
        let exprs = pad_sources(op, resolution, &netlist.symbols).unwrap();
        let rendered: Vec<String> = exprs.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["s", "{4'b0, a}", "b"]);
    }
}
