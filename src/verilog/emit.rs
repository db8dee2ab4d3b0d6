//! Structural Verilog emission.

use std::collections::HashSet;

use log::trace;

use super::padding::{pad_sources, PortExpr};
use super::primitive::{InstanceCounter, Primitive};
use super::resolve::resolve;
use crate::config::TranslateConfig;
use crate::design::{Netlist, CLOCK, RESET};
use crate::error::Result;
use crate::netlist::{Declaration, Operation, Operator};

const INDENT: &str = "    ";

/// Writes one Verilog module for a parsed [`Netlist`].
pub struct VerilogEmitter<'a> {
    netlist: &'a Netlist,
    config: &'a TranslateConfig,
}

impl<'a> VerilogEmitter<'a> {
    /// Create an emitter.
    pub fn new(netlist: &'a Netlist, config: &'a TranslateConfig) -> Self {
        Self { netlist, config }
    }

    /// Generate the complete module text.
    pub fn emit(&self) -> Result<String> {
        let mut v = String::new();

        v.push_str(&format!("`timescale {}\n\n", self.config.timescale));
        v.push_str(&format!("module {} (\n", self.config.module_name));
        v.push_str(&self.port_list());
        v.push_str("\n);\n");

        v.push_str(&self.wire_declarations());
        for decl in &self.netlist.registers {
            v.push_str(&declaration_line("wire", decl.width, &decl.names));
        }
        v.push('\n');

        let mut counter = InstanceCounter::new();
        for op in &self.netlist.operations {
            let instance = self.instance(op, &mut counter)?;
            trace!("{}", instance);
            v.push_str(INDENT);
            v.push_str(&instance);
            v.push('\n');
        }

        v.push_str("endmodule\n");
        Ok(v)
    }

    fn port_list(&self) -> String {
        let mut ports = vec![format!("{}input {}, {}", INDENT, CLOCK, RESET)];
        ports.extend(self.netlist.inputs.iter().map(|d| port_group("input", d)));
        ports.extend(self.netlist.outputs.iter().map(|d| port_group("output", d)));
        ports.join(",\n")
    }

    /// Wires that are one bit wide or only ever read as a mux select.
    fn selector_wires(&self) -> HashSet<&'a str> {
        let netlist: &'a Netlist = self.netlist;
        let mut conditions = HashSet::new();
        let mut data = HashSet::new();
        for op in &netlist.operations {
            for name in op.data_sources().iter().filter_map(|s| s.signal()) {
                data.insert(name);
            }
            if let Some(name) = op.condition().and_then(|c| c.signal()) {
                conditions.insert(name);
            }
        }

        netlist
            .wires
            .iter()
            .flat_map(|decl| decl.names.iter().map(move |name| (decl.width, name.as_str())))
            .filter(|(width, name)| {
                *width == 1 || (conditions.contains(name) && !data.contains(name))
            })
            .map(|(_, name)| name)
            .collect()
    }

    fn wire_declarations(&self) -> String {
        let selectors = self.selector_wires();
        let mut out = String::new();

        let single: Vec<String> = self
            .netlist
            .wires
            .iter()
            .flat_map(|decl| decl.names.iter())
            .filter(|name| selectors.contains(name.as_str()))
            .cloned()
            .collect();
        if !single.is_empty() {
            out.push_str(&declaration_line("wire", 1, &single));
        }

        for decl in &self.netlist.wires {
            let ranged: Vec<String> = decl
                .names
                .iter()
                .filter(|name| !selectors.contains(name.as_str()))
                .cloned()
                .collect();
            if !ranged.is_empty() {
                out.push_str(&declaration_line("wire", decl.width, &ranged));
            }
        }
        out
    }

    /// One primitive instantiation, without indentation.
    pub fn instance(&self, op: &Operation, counter: &mut InstanceCounter) -> Result<String> {
        let resolution = resolve(op, &self.netlist.symbols)?;
        let sources = pad_sources(op, resolution, &self.netlist.symbols)?;
        let primitive = Primitive::for_operator(op.operator);
        let dest = PortExpr::Signal {
            name: op.destination.clone(),
            width: self.netlist.symbols.resolve(&op.destination, op.line)?.width,
        };

        let ports = port_order(op.operator, sources, dest);
        let ports: Vec<String> = ports.iter().map(ToString::to_string).collect();

        Ok(format!(
            "{} #(.DATAWIDTH({})) {}({});",
            primitive.module_name(resolution.signed),
            resolution.width,
            counter.next_name(primitive),
            ports.join(", ")
        ))
    }
}

/// Arrange sources and destination in the primitive's port order.
fn port_order(operator: Operator, sources: Vec<PortExpr>, dest: PortExpr) -> Vec<PortExpr> {
    let mut sources = sources.into_iter();
    let mut next = || sources.next().unwrap_or(PortExpr::Bit(false));

    match operator {
        Operator::Add | Operator::Sub | Operator::Mul | Operator::Shr | Operator::Shl => {
            let (left, right) = (next(), next());
            vec![left, right, dest]
        }
        Operator::Gt | Operator::Lt | Operator::Eq => {
            let (left, right) = (next(), next());
            let zero = PortExpr::Bit(false);
            match operator {
                Operator::Gt => vec![left, right, dest, zero.clone(), zero],
                Operator::Lt => vec![left, right, zero.clone(), dest, zero],
                _ => vec![left, right, zero.clone(), zero, dest],
            }
        }
        Operator::Mux => {
            let (condition, if_true, if_false) = (next(), next(), next());
            vec![if_false, if_true, condition, dest]
        }
        Operator::Reg => {
            let source = next();
            vec![
                source,
                PortExpr::Signal {
                    name: CLOCK.to_string(),
                    width: 1,
                },
                PortExpr::Signal {
                    name: RESET.to_string(),
                    width: 1,
                },
                dest,
            ]
        }
    }
}

fn range(width: u32) -> String {
    if width > 1 {
        format!("[{}:0] ", width - 1)
    } else {
        String::new()
    }
}

fn port_group(direction: &str, decl: &Declaration) -> String {
    format!("{}{} {}{}", INDENT, direction, range(decl.width), decl.names.join(", "))
}

fn declaration_line(net: &str, width: u32, names: &[String]) -> String {
    format!("{}{} {}{};\n", INDENT, net, range(width), names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;

    fn emit(input: &str) -> String {
        let netlist = netlist::parse(input).unwrap();
        let config = TranslateConfig::new().with_module_name("top");
        VerilogEmitter::new(&netlist, &config).emit().unwrap()
    }

    fn instances(text: &str) -> Vec<&str> {
        text.lines()
            .map(str::trim)
            .filter(|l| l.contains("#(.DATAWIDTH("))
            .collect()
    }

    #[test]
    fn test_emit_adder_module() {
        let text = emit("input Int8 a, b\noutput Int8 c\nc = a + b\n");
        let expected = "`timescale 1ns / 1ps\n\
            \n\
            module top (\n    \
            input Clk, Rst,\n    \
            input [7:0] a, b,\n    \
            output [7:0] c\n\
            );\n    \
            wire [7:0] cwire;\n\
            \n    \
            SADD #(.DATAWIDTH(8)) ADD0(a, b, cwire);\n    \
            SREG #(.DATAWIDTH(8)) REG0(cwire, Clk, Rst, c);\n\
            endmodule\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_comparator_flags_and_padding() {
        let text = emit("input Int8 a\ninput Int16 b\noutput Int1 c\nc = a > b\n");
        assert_eq!(
            instances(&text),
            vec![
                "SCOMP #(.DATAWIDTH(16)) COMP0({{8{a[7]}}, a}, b, cwire, 1'b0, 1'b0);",
                "SREG #(.DATAWIDTH(1)) REG0(cwire, Clk, Rst, c);",
            ]
        );
        assert!(text.contains("    wire cwire;\n"));
        assert!(text.contains("    output c\n"));
    }

    #[test]
    fn test_comparator_flag_positions() {
        let text = emit("input UInt4 a, b\nwire UInt1 lt, eq\nlt = a < b\neq = a == b\n");
        assert_eq!(
            instances(&text),
            vec![
                "COMP #(.DATAWIDTH(4)) COMP0(a, b, 1'b0, lt, 1'b0);",
                "COMP #(.DATAWIDTH(4)) COMP1(a, b, 1'b0, 1'b0, eq);",
            ]
        );
    }

    #[test]
    fn test_mux_port_order_and_selector_wire() {
        let input = "input UInt8 a, b\ninput UInt1 s\nwire UInt8 sel, t\nwire UInt8 d\n\
                     t = a + b\nsel = a\nd = sel ? t : b\n";
        let text = emit(input);
        assert!(text.contains("    wire sel;\n    wire [7:0] t;\n    wire [7:0] d;\n"));
        assert!(instances(&text).contains(&"MUX2x1 #(.DATAWIDTH(8)) MUX0(b, t, sel, d);"));
    }

    #[test]
    fn test_shift_and_zero_extension() {
        let text = emit("input UInt8 a\ninput UInt2 n\nwire UInt8 x, y\nx = a >> n\ny = a << 1\n");
        assert_eq!(
            instances(&text),
            vec![
                "SHR #(.DATAWIDTH(8)) SHR0(a, {6'b0, n}, x);",
                "SHL #(.DATAWIDTH(8)) SHL0(a, 1, y);",
            ]
        );
    }

    #[test]
    fn test_register_declarations() {
        let text = emit("input UInt16 d\nregister UInt16 q\nq = d\n");
        assert!(text.contains(
            "    wire [15:0] q;\n\n    REG #(.DATAWIDTH(16)) REG0(d, Clk, Rst, q);\n"
        ));
    }

    #[test]
    fn test_no_outputs_has_no_trailing_comma() {
        let text = emit("input Int8 a, b\nwire Int8 x\nx = a * b\n");
        assert!(text.contains("    input [7:0] a, b\n);\n"));
    }

    #[test]
    fn test_instance_counters_per_kind() {
        let input = "input UInt8 a, b\noutput UInt8 x, y\nwire UInt8 s\n\
                     x = a + b\ns = a - b\ny = a + s\n";
        let names: Vec<String> = instances(&emit(input))
            .iter()
            .map(|l| {
                let instance = l.split_whitespace().nth(2).unwrap_or("");
                instance.split('(').next().unwrap_or("").to_string()
            })
            .collect();
        assert_eq!(names, vec!["ADD0", "REG0", "SUB0", "ADD1", "REG1"]);
    }
}
