//! The external datapath primitive library.

use std::collections::HashMap;

use crate::netlist::Operator;

/// Parameterized primitives available for instantiation.
///
/// Every primitive takes a `DATAWIDTH` parameter and exists in an unsigned
/// form and an `S`-prefixed signed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `ADD(a, b, sum)`
    Add,
    /// `SUB(a, b, diff)`
    Sub,
    /// `MUL(a, b, prod)`
    Mul,
    /// `COMP(a, b, gt, lt, eq)`
    Comp,
    /// `MUX2x1(a, b, sel, d)`, `d = sel ? b : a`
    Mux,
    /// `SHR(a, sh_amt, d)`
    Shr,
    /// `SHL(a, sh_amt, d)`
    Shl,
    /// `REG(d, Clk, Rst, q)`
    Reg,
}

impl Primitive {
    /// The primitive implementing an operator. Comparisons share [`Primitive::Comp`].
    pub fn for_operator(operator: Operator) -> Self {
        match operator {
            Operator::Add => Self::Add,
            Operator::Sub => Self::Sub,
            Operator::Mul => Self::Mul,
            Operator::Gt | Operator::Lt | Operator::Eq => Self::Comp,
            Operator::Mux => Self::Mux,
            Operator::Shr => Self::Shr,
            Operator::Shl => Self::Shl,
            Operator::Reg => Self::Reg,
        }
    }

    /// Unsigned module name in the primitive library.
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Comp => "COMP",
            Self::Mux => "MUX2x1",
            Self::Shr => "SHR",
            Self::Shl => "SHL",
            Self::Reg => "REG",
        }
    }

    /// Module name to instantiate for the given signedness.
    pub fn module_name(&self, signed: bool) -> String {
        if signed {
            format!("S{}", self.base_name())
        } else {
            self.base_name().to_string()
        }
    }

    /// Prefix of instance names, followed by the per-primitive counter.
    pub fn instance_prefix(&self) -> &'static str {
        match self {
            Self::Mux => "MUX",
            other => other.base_name(),
        }
    }
}

/// Running per-primitive instance counters.
#[derive(Debug, Default)]
pub struct InstanceCounter {
    counts: HashMap<Primitive, usize>,
}

impl InstanceCounter {
    /// Create a counter with every primitive at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next instance name for `primitive`, e.g. `ADD0`, `ADD1`.
    pub fn next_name(&mut self, primitive: Primitive) -> String {
        let count = self.counts.entry(primitive).or_insert(0);
        let name = format!("{}{}", primitive.instance_prefix(), count);
        *count += 1;
        name
    }
}
