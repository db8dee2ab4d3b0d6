//! Structural Verilog generation.
//!
//! Each operation becomes one instance of a parameterized primitive:
//!
//! 1. [`resolve`] picks the instance `DATAWIDTH` and signedness
//! 2. [`padding`] sign- or zero-extends operands narrower than that width
//! 3. [`VerilogEmitter`] writes the module header, declarations and instances
//!
//! | Operator | Primitive | Ports |
//! |----------|-----------|-------|
//! | `+` `-` `*` | `ADD` `SUB` `MUL` | `(a, b, d)` |
//! | `>` `<` `==` | `COMP` | `(a, b, gt, lt, eq)` |
//! | `? :` | `MUX2x1` | `(if_false, if_true, sel, d)` |
//! | `>>` `<<` | `SHR` `SHL` | `(a, sh_amt, d)` |
//! | copy | `REG` | `(d, Clk, Rst, q)` |
//!
//! Signed instances use the `S`-prefixed module of the same primitive.

pub mod padding;
pub mod resolve;

mod emit;
mod primitive;

pub use emit::VerilogEmitter;
pub use padding::{pad_sources, Extension, PortExpr};
pub use primitive::{InstanceCounter, Primitive};
pub use resolve::{resolve, Resolution};

use log::info;

use crate::config::TranslateConfig;
use crate::design::Netlist;
use crate::error::Result;

/// Generate the Verilog module for a netlist.
pub fn emit(netlist: &Netlist, config: &TranslateConfig) -> Result<String> {
    let text = VerilogEmitter::new(netlist, config).emit()?;
    info!(
        "emitted module '{}' with {} instance(s)",
        config.module_name,
        netlist.operations.len()
    );
    Ok(text)
}
