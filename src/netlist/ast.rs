//! Typed intermediate form produced by the netlist parser.

use std::fmt;

/// Declaration kinds supported by the netlist language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Module input port
    Input,
    /// Module output port
    Output,
    /// Internal combinational net
    Wire,
    /// Internal storage element
    Register,
}

impl DeclKind {
    /// Parse a declaration kind from its leading keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            "wire" => Some(Self::Wire),
            "register" => Some(Self::Register),
            _ => None,
        }
    }

    /// The netlist keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Wire => "wire",
            Self::Register => "register",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One declaration line, e.g. `input Int8 a, b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration kind
    pub kind: DeclKind,
    /// Whether the declared type is signed
    pub signed: bool,
    /// Bit width (1 or a power of two)
    pub width: u32,
    /// Declared names in source order
    pub names: Vec<String>,
    /// Source line number (0 for synthesized declarations)
    pub line: usize,
}

impl Declaration {
    /// Create a declaration.
    pub fn new(kind: DeclKind, signed: bool, width: u32, names: Vec<String>, line: usize) -> Self {
        Self {
            kind,
            signed,
            width,
            names,
            line,
        }
    }

    /// Whether this declaration was synthesized rather than written in the source.
    pub fn is_synthesized(&self) -> bool {
        self.line == 0
    }
}

/// Datapath operators, one per assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition `+`
    Add,
    /// Subtraction `-`
    Sub,
    /// Multiplication `*`
    Mul,
    /// Greater than `>`
    Gt,
    /// Less than `<`
    Lt,
    /// Equality `==`
    Eq,
    /// Two-way select `? :`
    Mux,
    /// Shift right `>>`
    Shr,
    /// Shift left `<<`
    Shl,
    /// Plain signal copy through a register stage
    Reg,
}

impl Operator {
    /// Parse a binary operator from its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "==" => Some(Self::Eq),
            ">>" => Some(Self::Shr),
            "<<" => Some(Self::Shl),
            _ => None,
        }
    }

    /// Number of source operands (the destination is not counted).
    pub fn source_count(&self) -> usize {
        match self {
            Self::Reg => 1,
            Self::Mux => 3,
            _ => 2,
        }
    }

    /// Whether the operator is one of the comparisons sharing the comparator primitive.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Eq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Gt => "GT",
            Self::Lt => "LT",
            Self::Eq => "EQ",
            Self::Mux => "MUX",
            Self::Shr => "SHR",
            Self::Shl => "SHL",
            Self::Reg => "REG",
        };
        f.write_str(name)
    }
}

/// A source operand: a declared signal or an unsigned decimal literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Reference to a declared signal
    Signal(String),
    /// Integer literal
    Literal(u64),
}

impl Operand {
    /// The referenced signal name, if this operand is not a literal.
    pub fn signal(&self) -> Option<&str> {
        match self {
            Self::Signal(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(name) => f.write_str(name),
            Self::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// One datapath operation.
///
/// Source operand positions depend on the operator:
/// - binary operators: `[left, right]`
/// - [`Operator::Mux`]: `[condition, if_true, if_false]`
/// - [`Operator::Reg`]: `[source]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The operator
    pub operator: Operator,
    /// Write target
    pub destination: String,
    /// Source operands in positional order
    pub sources: Vec<Operand>,
    /// Source line number of the originating assignment
    pub line: usize,
}

impl Operation {
    /// Create an operation.
    pub fn new(
        operator: Operator,
        destination: impl Into<String>,
        sources: Vec<Operand>,
        line: usize,
    ) -> Self {
        debug_assert_eq!(sources.len(), operator.source_count());
        Self {
            operator,
            destination: destination.into(),
            sources,
            line,
        }
    }

    /// Create a register transfer `destination = source`.
    pub fn register(
        destination: impl Into<String>,
        source: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::new(
            Operator::Reg,
            destination,
            vec![Operand::Signal(source.into())],
            line,
        )
    }

    /// All operands with the destination first.
    pub fn operands(&self) -> impl Iterator<Item = Operand> + '_ {
        std::iter::once(Operand::Signal(self.destination.clone()))
            .chain(self.sources.iter().cloned())
    }

    /// Source operands that carry data, excluding a mux condition.
    pub fn data_sources(&self) -> &[Operand] {
        match self.operator {
            Operator::Mux => &self.sources[1..],
            _ => &self.sources,
        }
    }

    /// The mux condition operand, if this is a mux.
    pub fn condition(&self) -> Option<&Operand> {
        match self.operator {
            Operator::Mux => self.sources.first(),
            _ => None,
        }
    }
}
