//! # Dpgen Core
//!
//! A datapath generator that translates behavioral netlists into
//! structural Verilog.
//!
//! This library provides:
//! - A parser for the line-oriented behavioral netlist language
//! - A symbol table with width and signedness inference
//! - Automatic register insertion in front of module outputs
//! - Sign/zero extension of narrow operands
//! - Emission of instances from a fixed parameterized primitive library
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`netlist`] - Line normalizer, lexer and parsers for the netlist language
//! - [`design`] - Symbol table and the [`Netlist`] compilation context
//! - [`verilog`] - Width/sign resolution, operand padding and Verilog emission
//! - [`config`] - Translation settings
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! dpgen circuit1.txt circuit1.v
//! ```
//!
//! ### Library
//!
//! ```
//! use dpgen_core::{translate, TranslateConfig};
//!
//! let netlist = "input Int8 a, b\noutput Int8 c\nc = a + b\n";
//! let config = TranslateConfig::new().with_module_name("adder");
//! let verilog = translate(netlist, &config).unwrap();
//! assert!(verilog.contains("SADD #(.DATAWIDTH(8)) ADD0(a, b, cwire);"));
//! ```
//!
//! ## Translation
//!
//! 1. Lines are normalized; blank lines are dropped and `//` aborts
//! 2. Declarations populate the symbol table; assignments become operations
//! 3. Assignments to outputs are routed through a synthesized wire and register
//! 4. Each operation is emitted as one primitive instance
//!
//! Any error aborts the translation; no partial module is produced.

pub mod config;
pub mod design;
pub mod error;
pub mod netlist;
pub mod verilog;

use std::path::Path;

use log::{info, warn};

// Re-export main types for convenience
pub use config::TranslateConfig;
pub use design::Netlist;
pub use error::{DpgenError, ErrorClass, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::translate_netlist;

/// Translate netlist text into a Verilog module.
pub fn translate(source: &str, config: &TranslateConfig) -> Result<String> {
    let netlist = netlist::parse_with_suffix(source, &config.wire_suffix)?;
    for name in netlist.undriven_outputs() {
        warn!("output '{}' is never assigned", name);
    }
    verilog::emit(&netlist, config)
}

/// Translate the netlist file at `input` and write the module to `output`.
///
/// The output file is only created once the whole translation succeeded. A
/// file left at `output` by an earlier run is removed when translation fails.
pub fn translate_file(input: &Path, output: &Path, config: &TranslateConfig) -> Result<()> {
    let text = match netlist::read_file(input).and_then(|source| translate(&source, config)) {
        Ok(text) => text,
        Err(e) => {
            discard_stale_output(output);
            return Err(e);
        }
    };

    std::fs::write(output, text).map_err(|e| DpgenError::FileWrite {
        path: output.display().to_string(),
        source: e,
    })?;
    info!("wrote {}", output.display());
    Ok(())
}

fn discard_stale_output(output: &Path) {
    if !output.is_file() {
        return;
    }
    match std::fs::remove_file(output) {
        Ok(()) => warn!("removed stale {}", output.display()),
        Err(e) => warn!("could not remove stale {}: {}", output.display(), e),
    }
}
